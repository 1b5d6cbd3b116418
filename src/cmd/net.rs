/*!
`net.rs`

The `net` subcommand group: host:port formatting, CIDR parsing and DNS
lookups.

  shellfn net joinhostport ::1 80            -> [::1]:80
  shellfn net parsecidr 192.0.2.1/24 -o json -> {"ip":"192.0.2.1","network":"192.0.2.0/24"}
  shellfn net lookuphost localhost           -> 127.0.0.1 (one address per line)

Lookups accept `--timeout SECONDS`; without it the resolver's own timeouts apply.
*/

use anyhow::Result;
use clap::{Args, Subcommand};
use std::io::Read;
use std::time::Duration;

use crate::cmd::format::{Outcome, Reply};
use crate::cmd::shared::{Listing, Operands, OutputArg};
use crate::funcs::net as f;
use crate::log_debug;

#[derive(Subcommand, Debug)]
#[command(rename_all = "lower")]
pub enum NetCommand {
    /// Combine HOST and PORT into a network address: HOST PORT
    JoinHostPort(Operands),
    /// Reverse lookup of ADDR: [ADDR]
    LookupAddr(LookupListing),
    /// Canonical name of HOST: [HOST]
    LookupCname(Lookup),
    /// Addresses of HOST: [HOST]
    LookupHost(LookupListing),
    /// TXT records of NAME: [NAME]
    LookupTxt(LookupListing),
    /// IP address and network of a CIDR string: [CIDR]
    ParseCidr(Listing),
}

/// `--timeout` for subcommands that hit the resolver.
#[derive(Args, Debug, Clone, Default)]
pub struct TimeoutArg {
    /// Give up on the lookup after SECONDS
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl TimeoutArg {
    fn duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct Lookup {
    #[command(flatten)]
    pub timeout: TimeoutArg,

    #[command(flatten)]
    pub operands: Operands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LookupListing {
    #[command(flatten)]
    pub output: OutputArg,

    #[command(flatten)]
    pub timeout: TimeoutArg,

    #[command(flatten)]
    pub operands: Operands,
}

pub fn execute_net(cmd: NetCommand, stdin: &mut dyn Read) -> Result<Reply> {
    use NetCommand::*;
    log_debug!("net: {cmd:?}");

    let reply = match cmd {
        JoinHostPort(ops) => {
            let [host, port] = ops.exact::<2>()?;
            Reply::plain(f::join_host_port(&host, &port))
        }
        ParseCidr(args) => {
            let format = args.output.format()?;
            let [raw] = args.operands.resolve::<1>(stdin)?;
            let cidr = f::parse_cidr(&raw)?;
            let record = Outcome::Record(vec![
                ("ip", cidr.ip.to_string()),
                ("network", cidr.network_string()),
            ]);
            Reply::new(record, format)
        }
        LookupAddr(args) => {
            let format = args.output.format()?;
            let [addr] = args.operands.resolve::<1>(stdin)?;
            Reply::new(f::lookup_addr(&addr, args.timeout.duration())?, format)
        }
        LookupHost(args) => {
            let format = args.output.format()?;
            let [host] = args.operands.resolve::<1>(stdin)?;
            Reply::new(f::lookup_host(&host, args.timeout.duration())?, format)
        }
        LookupTxt(args) => {
            let format = args.output.format()?;
            let [name] = args.operands.resolve::<1>(stdin)?;
            Reply::new(f::lookup_txt(&name, args.timeout.duration())?, format)
        }
        LookupCname(args) => {
            let [host] = args.operands.resolve::<1>(stdin)?;
            Reply::plain(f::lookup_cname(&host, args.timeout.duration())?)
        }
    };
    Ok(reply)
}
