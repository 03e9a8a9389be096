use std::fs::File;
use std::io::Write;
use std::path::Path;

use bgputil::validate::{valid_cidr, valid_ip_addr, valid_ipv4_addr, valid_ipv4_cidr};
use bgputil::{Error, Route, RouteSink};

/// Route sink emitting an iproute2 route-installation shell script.
///
/// Each route becomes `ip route add <prefix> via <nexthop>` (or the `-6`
/// form). The nexthop may be given either bare or in CIDR form; only its
/// address part is used. Writing a prefix of the other address family is an
/// error, which the pipeline downgrades to a skip.
pub(crate) struct Iproute2Script<W: Write> {
    writer: W,
    nexthop: String,
    nexthop_is_ipv4: bool,
}

impl Iproute2Script<File> {
    pub(crate) fn create<P: AsRef<Path>>(path: P, nexthop: &str) -> Result<Self, Error> {
        Self::from_writer(File::create(path)?, nexthop)
    }
}

impl<W: Write> Iproute2Script<W> {
    pub(crate) fn from_writer(mut output: W, nexthop: &str) -> Result<Self, Error> {
        let address = if valid_ip_addr(nexthop) {
            nexthop
        } else if valid_cidr(nexthop) {
            nexthop.split('/').next().unwrap_or(nexthop)
        } else {
            return Err(Error::InvalidAddress {
                family: "ip",
                text: nexthop.to_string(),
            });
        };
        let nexthop_is_ipv4 = valid_ipv4_addr(address);
        writeln!(output, "#!/bin/bash")?;
        writeln!(output, "# Auto-generated iproute2 script")?;
        writeln!(output)?;
        Ok(Self {
            writer: output,
            nexthop: address.to_string(),
            nexthop_is_ipv4,
        })
    }

    pub(crate) fn finish(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> RouteSink for Iproute2Script<W> {
    fn write_route(&mut self, route: &Route) -> Result<(), Error> {
        let prefix_is_ipv4 = valid_ipv4_cidr(route.prefix());
        if prefix_is_ipv4 != self.nexthop_is_ipv4 {
            return Err(Error::FamilyMismatch {
                prefix: route.prefix().to_string(),
                nexthop: self.nexthop.clone(),
            });
        }
        if prefix_is_ipv4 {
            writeln!(self.writer, "ip route add {} via {}", route.prefix(), self.nexthop)?;
        } else {
            writeln!(self.writer, "ip -6 route add {} via {}", route.prefix(), self.nexthop)?;
        }
        Ok(())
    }
}
