//! Canonical text rendering of URIs and their authorities.

use std::fmt::{self, Write};
use std::net::IpAddr;

use crate::address::AddressService;
use crate::authority::Host;
use crate::percent::{self, AsciiSet, FRAGMENT, HOST, PATH, USERINFO};
use crate::uri::Uri;

/// Set for the password half of userinfo: only the first ':' stays literal.
const PASSWORD: AsciiSet = USERINFO.remove(b':');

fn write_encoded<W: Write>(out: &mut W, text: &str, set: &AsciiSet) -> fmt::Result {
    if text.bytes().all(|b| set.contains(b)) {
        out.write_str(text)
    } else {
        out.write_str(&percent::encode(text, set))
    }
}

pub(crate) fn write_host<W, S>(host: &Host, out: &mut W, service: &S) -> fmt::Result
where
    W: Write,
    S: AddressService + ?Sized,
{
    match host {
        Host::Name(name) => write_encoded(out, name, &HOST),
        Host::Ip(ip @ IpAddr::V4(_)) => service.format(ip, out),
        Host::Ip(ip @ IpAddr::V6(_)) => {
            out.write_char('[')?;
            service.format(ip, out)?;
            out.write_char(']')
        }
    }
}

pub(crate) fn write_authority<W, S>(
    userinfo: &str,
    host: &Host,
    port: Option<u16>,
    out: &mut W,
    service: &S,
) -> fmt::Result
where
    W: Write,
    S: AddressService + ?Sized,
{
    if !userinfo.is_empty() {
        match userinfo.split_once(':') {
            Some((user, password)) => {
                write_encoded(out, user, &USERINFO)?;
                out.write_char(':')?;
                write_encoded(out, password, &PASSWORD)?;
            }
            None => write_encoded(out, userinfo, &USERINFO)?,
        }
        out.write_char('@')?;
    }

    write_host(host, out, service)?;

    if let Some(port) = port {
        write!(out, ":{port}")?;
    }

    Ok(())
}

pub(crate) fn write_uri<W, S>(uri: &Uri, out: &mut W, service: &S) -> fmt::Result
where
    W: Write,
    S: AddressService + ?Sized,
{
    out.write_str(uri.scheme())?;
    out.write_char(':')?;

    // A path starting with "//" needs an (empty) authority in front of it,
    // otherwise it would be read back as one.
    if uri.has_authority() || uri.path().starts_with("//") {
        out.write_str("//")?;
        write_authority(uri.userinfo(), uri.host(), uri.port(), out, service)?;
    }

    write_encoded(out, uri.path(), &PATH)?;

    if !uri.query().is_empty() {
        out.write_char('?')?;
        out.write_str(uri.query())?;
    }

    if !uri.fragment().is_empty() {
        out.write_char('#')?;
        write_encoded(out, uri.fragment(), &FRAGMENT)?;
    }

    Ok(())
}
