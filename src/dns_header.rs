use crate::error::ParseError;
use crate::wire::{put_u16, read_u16};

/// Size of the fixed DNS header on the wire.
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsFlags {
    pub qr: bool,              // Query/Response (false = query, true = response)
    pub opcode: u8,            // Operation code (0 = standard query)
    pub aa: bool,              // Authoritative Answer
    pub tc: bool,              // Truncation
    pub rd: bool,              // Recursion Desired
    pub ra: bool,              // Recursion Available
    pub z: u8,                 // Reserved, echoed as received
    pub rcode: u8,             // Response code, echoed as received
}

impl DnsFlags {
    pub fn to_u16(&self) -> u16 {
        let mut flags: u16 = 0;

        if self.qr { flags |= 1 << 15; }           // QR at bit 15
        flags |= (self.opcode as u16 & 0xF) << 11; // OPCODE at bits 11-14
        if self.aa { flags |= 1 << 10; }           // AA at bit 10
        if self.tc { flags |= 1 << 9; }            // TC at bit 9
        if self.rd { flags |= 1 << 8; }            // RD at bit 8
        if self.ra { flags |= 1 << 7; }            // RA at bit 7
        flags |= (self.z as u16 & 0x7) << 4;       // Z at bits 4-6
        flags |= self.rcode as u16 & 0xF;          // RCODE at bits 0-3

        flags
    }

    pub fn from_u16(flags: u16) -> Self {
        DnsFlags {
            qr: (flags & (1 << 15)) != 0,
            opcode: ((flags >> 11) & 0xF) as u8,
            aa: (flags & (1 << 10)) != 0,
            tc: (flags & (1 << 9)) != 0,
            rd: (flags & (1 << 8)) != 0,
            ra: (flags & (1 << 7)) != 0,
            z: ((flags >> 4) & 0x7) as u8,
            rcode: (flags & 0xF) as u8,
        }
    }
}

impl DnsHeader {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let field = |offset| read_u16(bytes, offset).ok_or(ParseError::TooShort(bytes.len()));

        Ok(DnsHeader {
            id: field(0)?,
            flags: field(2)?,
            question_count: field(4)?,
            answer_count: field(6)?,
            authority_count: field(8)?,
            additional_count: field(10)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        let mut buf = &mut bytes[..];

        put_u16(&mut buf, self.id);
        put_u16(&mut buf, self.flags);
        put_u16(&mut buf, self.question_count);
        put_u16(&mut buf, self.answer_count);
        put_u16(&mut buf, self.authority_count);
        put_u16(&mut buf, self.additional_count);

        bytes
    }

    pub fn decoded_flags(&self) -> DnsFlags {
        DnsFlags::from_u16(self.flags)
    }

    /// True when any answer, authority or additional record is present,
    /// i.e. the message looks like a reply rather than a query.
    pub fn carries_records(&self) -> bool {
        self.answer_count != 0 || self.authority_count != 0 || self.additional_count != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_roundtrip_preserves_every_field() {
        let flags = DnsFlags {
            qr: false,
            opcode: 2,
            aa: true,
            tc: false,
            rd: true,
            ra: false,
            z: 5,
            rcode: 3,
        };
        assert_eq!(DnsFlags::from_u16(flags.to_u16()), flags);
    }

    #[test]
    fn test_flag_bits_match_header_bytes() {
        // Byte 2 bit 1 is TC, byte 2 bit 0 is RD, byte 3 bit 7 is RA.
        let flags = DnsFlags::from_u16(u16::from_be_bytes([0b0000_0011, 0b1000_0000]));
        assert!(flags.tc);
        assert!(flags.rd);
        assert!(flags.ra);
        assert!(!flags.qr);
    }

    #[test]
    fn test_header_from_bytes() {
        let bytes = [0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let header = DnsHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header.id, 0x1234);
        assert_eq!(header.flags, 0x0100);
        assert_eq!(header.question_count, 1);
        assert!(!header.carries_records());
        assert!(header.decoded_flags().rd);
        assert_eq!(header.to_bytes(), bytes);
    }

    #[test]
    fn test_header_too_short() {
        assert_eq!(
            DnsHeader::from_bytes(&[0u8; 11]),
            Err(ParseError::TooShort(11))
        );
    }

    #[test]
    fn test_carries_records() {
        let mut header = DnsHeader::from_bytes(&[0u8; 12]).unwrap();
        header.authority_count = 1;
        assert!(header.carries_records());
    }
}
