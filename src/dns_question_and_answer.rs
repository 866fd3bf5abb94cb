use std::net::Ipv4Addr;

use bytes::BufMut;

use crate::error::ParseError;
use crate::wire::{put_u16, put_u32, read_u16};

/// Longest label allowed by RFC 1035.
const MAX_LABEL_LEN: usize = 63;
/// Longest encoded name allowed by RFC 1035, length octets included.
const MAX_NAME_LEN: usize = 255;

/// DNS Question Section
/// Format: QNAME + QTYPE (2 bytes) + QCLASS (2 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String,  // Dotted form, for logging only
    pub qtype: u16,    // Query type (A, AAAA, CNAME, etc.)
    pub qclass: u16,   // Query class (usually IN for Internet)
    pub offset: usize, // Where QNAME starts in the message
    pub end: usize,    // One past the QCLASS field
}

/// Answer record appended to a synthesized reply.
/// Format: NAME (pointer) + TYPE + CLASS + TTL + RDLENGTH + RDATA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub name: u16, // Compression pointer to the question name
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: [u8; 4],
}

/// Common DNS record types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A = 1,      // IPv4 address
    NS = 2,     // Name server
    CNAME = 5,  // Canonical name
    SOA = 6,    // Start of authority
    WKS = 11,   // Well known service
    PTR = 12,   // Pointer record
    HINFO = 13, // Host information
    MINFO = 14, // Mailbox information
    MX = 15,    // Mail exchange
    TXT = 16,   // Text record
    AAAA = 28,  // IPv6 address
    URI = 256,  // Uniform resource identifier
}

impl RecordType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            11 => Some(RecordType::WKS),
            12 => Some(RecordType::PTR),
            13 => Some(RecordType::HINFO),
            14 => Some(RecordType::MINFO),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            28 => Some(RecordType::AAAA),
            256 => Some(RecordType::URI),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

/// Common DNS classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    IN = 1,    // Internet
    ANY = 255, // Any class
}

impl RecordClass {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordClass::IN),
            255 => Some(RecordClass::ANY),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

impl DnsQuestion {
    /// Parse the question starting at `offset`.
    ///
    /// The name is walked label by label and every step is checked against
    /// the buffer, so a crafted length byte can never read past the end.
    pub fn from_bytes(bytes: &[u8], offset: usize) -> Result<Self, ParseError> {
        let (name, footer) = walk_domain_name(bytes, offset)?;

        let qtype = read_u16(bytes, footer).ok_or(ParseError::IncompleteQuestion(footer))?;
        let qclass = read_u16(bytes, footer + 2).ok_or(ParseError::IncompleteQuestion(footer))?;

        Ok(DnsQuestion {
            name,
            qtype,
            qclass,
            offset,
            end: footer + 4,
        })
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.qtype)
    }

    /// Compression pointer that refers back to this question's name.
    pub fn name_pointer(&self) -> u16 {
        0xC000 | (self.offset as u16 & 0x3FFF)
    }
}

impl DnsAnswer {
    /// Size of an A record answer on the wire.
    pub const A_RECORD_LEN: usize = 16;

    /// Create an A record answer whose name points back at `question`.
    pub fn new_a_record(question: &DnsQuestion, ttl: u32, ip: Ipv4Addr) -> Self {
        DnsAnswer {
            name: question.name_pointer(),
            rtype: RecordType::A.to_u16(),
            rclass: RecordClass::IN.to_u16(),
            ttl,
            rdata: ip.octets(),
        }
    }

    /// Append the answer to `buf` in wire order.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        put_u16(buf, self.name);
        put_u16(buf, self.rtype);
        put_u16(buf, self.rclass);
        put_u32(buf, self.ttl);
        put_u16(buf, self.rdata.len() as u16);
        buf.put_slice(&self.rdata);
    }
}

/// Walk a length-prefixed label sequence starting at `offset`.
///
/// Returns the dotted name and the offset just past the terminating zero
/// byte. Compression pointers are not accepted here: the only question of
/// a query sits right after the header, so there is nothing to point at.
pub fn walk_domain_name(bytes: &[u8], mut offset: usize) -> Result<(String, usize), ParseError> {
    let start = offset;
    let mut labels = Vec::new();

    loop {
        let length = *bytes.get(offset).ok_or(ParseError::MalformedName {
            offset,
            reason: "name runs past the end of the packet",
        })? as usize;

        if length > MAX_LABEL_LEN {
            return Err(ParseError::MalformedName {
                offset,
                reason: "label length exceeds 63 or is a pointer",
            });
        }

        // Move past the length byte
        offset += 1;

        if offset - start + length > MAX_NAME_LEN {
            return Err(ParseError::MalformedName {
                offset,
                reason: "name exceeds 255 bytes",
            });
        }

        if length == 0 {
            break;
        }

        let label = bytes
            .get(offset..offset + length)
            .ok_or(ParseError::MalformedName {
                offset,
                reason: "label runs past the end of the packet",
            })?;

        labels.push(String::from_utf8_lossy(label).into_owned());
        offset += length;
    }

    let name = if labels.is_empty() {
        ".".to_string() // Root domain
    } else {
        labels.join(".")
    };

    Ok((name, offset))
}
