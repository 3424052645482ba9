use std::io::{self, IsTerminal, Read, Write};
use std::net::IpAddr;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use i_dunno::{IDunno, DELIGHTFUL, MINIMUM, SATISFACTORY};

mod logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Minimum,
    Satisfactory,
    Delightful,
}

impl Level {
    fn name(self) -> &'static str {
        match self {
            Level::Minimum => MINIMUM,
            Level::Satisfactory => SATISFACTORY,
            Level::Delightful => DELIGHTFUL,
        }
    }
}

/// Convert IPv6 or IPv4 addresses into RFC8771-compliant I-DUNNO representation.
#[derive(Debug, Parser)]
#[clap(name = "i-dunno", version)]
struct Args {
    /// Desired confusion level of I-DUNNO representation.
    #[clap(
        short = 'l',
        long = "confusion-level",
        value_enum,
        default_value = "minimum",
        env = "I_DUNNO_CONFUSION_LEVEL"
    )]
    level: Level,

    /// Read an I-DUNNO representation from standard input and print the address.
    #[clap(short = 'd', long, conflicts_with = "addr")]
    decode: bool,

    /// IPv6 or IPv4 address in standard notation.
    #[clap(required_unless_present = "decode")]
    addr: Option<IpAddr>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::setup_logging("warn");

    let i_dunno = IDunno::new();
    let result = match args.addr {
        Some(addr) if !args.decode => encode(&i_dunno, addr, args.level),
        _ => decode(&i_dunno),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn encode(i_dunno: &IDunno, addr: IpAddr, level: Level) -> Result<(), Box<dyn std::error::Error>> {
    let form = i_dunno.encode_ipaddr(addr, level.name())?;
    tracing::info!(%addr, level = level.name(), bytes = form.len(), "encoded address");

    let mut stdout = io::stdout().lock();
    stdout.write_all(&form)?;
    if stdout.is_terminal() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn decode(i_dunno: &IDunno) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = Vec::new();
    io::stdin().lock().read_to_end(&mut form)?;

    // '\n' is a valid element, so only drop it if the form is invalid with it
    let addr = match (i_dunno.decode_ipaddr(&form), form.strip_suffix(b"\n")) {
        (Ok(addr), _) => addr,
        (Err(_), Some(stripped)) => i_dunno.decode_ipaddr(stripped)?,
        (Err(err), None) => return Err(err.into()),
    };
    println!("{addr}");
    Ok(())
}
