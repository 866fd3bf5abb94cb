use thiserror::Error;

/// Reasons a datagram is refused by the query parser.
///
/// Every variant is terminal for the datagram that produced it and the
/// responder stays silent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("packet too short: {0} bytes, need at least 12")]
    TooShort(usize),

    #[error("packet larger than 512 bytes: {0} bytes")]
    TooLarge(usize),

    #[error("this is a reply (ancount={answers}, nscount={authorities}, arcount={additionals})")]
    NotAQuery {
        answers: u16,
        authorities: u16,
        additionals: u16,
    },

    #[error("truncated query, can't use this")]
    Truncated,

    #[error("expected exactly one question, got {0}")]
    QuestionCount(u16),

    #[error("malformed question name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    #[error("question footer at offset {0} runs past the end of the packet")]
    IncompleteQuestion(usize),
}
