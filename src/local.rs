use std::net::Ipv4Addr;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::dns_message::{parse_query, synthesize_reply};
use crate::dns_question_and_answer::{RecordClass, RecordType};
use crate::error::ParseError;

/// What the responder does with one datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Send these bytes back to the sender.
    Reply(Bytes),
    /// A valid query for something other than an address record; stay silent
    /// so the lookup fails on the client.
    Ignored { qtype: u16 },
    /// The datagram was refused by the parser; stay silent.
    Rejected(ParseError),
}

impl Disposition {
    pub fn reply(&self) -> Option<&[u8]> {
        match self {
            Disposition::Reply(bytes) => Some(&bytes[..]),
            _ => None,
        }
    }
}

/// Answer every address query with `address`, whatever name was asked for.
pub fn answer_query(buf: &[u8], address: Ipv4Addr) -> Disposition {
    let query = match parse_query(buf) {
        Ok(query) => query,
        Err(e) => {
            debug!(error = %e, "dropping datagram");
            return Disposition::Rejected(e);
        }
    };

    trace!(
        header = ?query.header,
        flags = ?query.header.decoded_flags(),
        name = %query.question.name,
        qtype = query.question.qtype,
        qclass = ?RecordClass::from_u16(query.question.qclass),
        question = ?query.question_bytes(),
        "parsed query"
    );

    if query.question.record_type() != Some(RecordType::A) {
        debug!(
            name = %query.question.name,
            qtype = query.question.qtype,
            "not an address query, no reply"
        );
        return Disposition::Ignored {
            qtype: query.question.qtype,
        };
    }

    debug!(name = %query.question.name, %address, "answering with portal address");
    Disposition::Reply(synthesize_reply(&query, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);

    fn query(qtype: u16) -> Vec<u8> {
        let mut buf = vec![0x00, 0x2A, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
        buf.extend_from_slice(&[7, b'c', b'a', b'p', b't', b'i', b'v', b'e']);
        buf.extend_from_slice(&[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0]);
        buf.extend_from_slice(&qtype.to_be_bytes());
        buf.extend_from_slice(&[0, 1]);
        buf
    }

    #[test]
    fn test_address_query_is_answered() {
        let buf = query(1);
        let disposition = answer_query(&buf, GATEWAY);
        let reply = disposition.reply().unwrap();

        assert_eq!(reply.len(), buf.len() + 16);
        assert_eq!(&reply[..2], &[0x00, 0x2A]);
        assert_eq!(&reply[reply.len() - 4..], &[192, 168, 4, 1]);
    }

    #[test]
    fn test_txt_query_gets_no_reply() {
        let disposition = answer_query(&query(16), GATEWAY);
        assert_eq!(disposition, Disposition::Ignored { qtype: 16 });
        assert!(disposition.reply().is_none());
    }

    #[test]
    fn test_aaaa_query_gets_no_reply() {
        assert_eq!(
            answer_query(&query(28), GATEWAY),
            Disposition::Ignored { qtype: 28 }
        );
    }

    #[test]
    fn test_reply_datagram_gets_no_reply() {
        let mut buf = query(1);
        buf[7] = 1;
        assert!(matches!(
            answer_query(&buf, GATEWAY),
            Disposition::Rejected(ParseError::NotAQuery { .. })
        ));
    }

    #[test]
    fn test_rejection_does_not_affect_next_datagram() {
        assert!(matches!(
            answer_query(&[0u8; 3], GATEWAY),
            Disposition::Rejected(ParseError::TooShort(3))
        ));
        assert!(answer_query(&query(1), GATEWAY).reply().is_some());
    }
}
