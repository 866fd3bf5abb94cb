use std::net::Ipv4Addr;

use bytes::{BufMut, Bytes, BytesMut};

use crate::dns_header::{DnsHeader, HEADER_LEN};
use crate::dns_question_and_answer::{DnsAnswer, DnsQuestion};
use crate::error::ParseError;

/// Largest DNS message accepted over UDP.
pub const MAX_MESSAGE_LEN: usize = 512;

/// TTL of the synthesized answer. Kept short so clients forget the
/// portal address soon after leaving the captive network.
pub const ANSWER_TTL: u32 = 10;

/// A validated single-question query.
///
/// Holds a copy of the datagram so the reply can reuse the question bytes
/// exactly as they were received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub header: DnsHeader,
    pub question: DnsQuestion,
    message: Bytes,
}

impl DnsQuery {
    /// The raw datagram this query was parsed from.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Bytes of the question section, QNAME through QCLASS.
    pub fn question_bytes(&self) -> &[u8] {
        &self.message[self.question.offset..self.question.end]
    }
}

/// Parse a DNS query from the datagram in `buf`.
/// Takes an immutable borrow of the buffer, returns an owned query
pub fn parse_query(buf: &[u8]) -> Result<DnsQuery, ParseError> {
    if buf.len() < HEADER_LEN {
        return Err(ParseError::TooShort(buf.len()));
    }
    if buf.len() > MAX_MESSAGE_LEN {
        return Err(ParseError::TooLarge(buf.len()));
    }

    let header = DnsHeader::from_bytes(buf)?;

    if header.carries_records() {
        return Err(ParseError::NotAQuery {
            answers: header.answer_count,
            authorities: header.authority_count,
            additionals: header.additional_count,
        });
    }
    if header.decoded_flags().tc {
        return Err(ParseError::Truncated);
    }
    if header.question_count != 1 {
        return Err(ParseError::QuestionCount(header.question_count));
    }

    let question = DnsQuestion::from_bytes(buf, HEADER_LEN)?;

    Ok(DnsQuery {
        header,
        question,
        message: Bytes::copy_from_slice(buf),
    })
}

/// Create the reply header for `request`.
///
/// QR and RA are raised; every other flag bit, including the opcode and
/// response code, is echoed as received.
pub fn create_response_header(request: &DnsHeader, answer_count: u16) -> DnsHeader {
    let mut flags = request.decoded_flags();
    flags.qr = true;
    flags.ra = true;

    DnsHeader {
        id: request.id,
        flags: flags.to_u16(),
        question_count: request.question_count,
        answer_count,
        authority_count: 0,
        additional_count: 0,
    }
}

/// Build the reply advertising `address` for `query`.
///
/// The header is rewritten, everything after it is copied verbatim and a
/// single A record is appended, so the reply is 16 bytes longer than the
/// query.
pub fn synthesize_reply(query: &DnsQuery, address: Ipv4Addr) -> Bytes {
    let message = query.message();
    let mut reply = BytesMut::with_capacity(message.len() + DnsAnswer::A_RECORD_LEN);

    reply.put_slice(&create_response_header(&query.header, 1).to_bytes());
    reply.put_slice(&message[HEADER_LEN..]);

    DnsAnswer::new_a_record(&query.question, ANSWER_TTL, address).write_to(&mut reply);

    reply.freeze()
}
