//! Request composition and reply decoding.
//!
//! The daemon owns the command language. The client only joins its
//! arguments into one line of text and glues the reply frames back
//! together; neither side is interpreted here.

use bytes::Bytes;

use crate::error::ClientError;

/// Request sent when no arguments are given.
pub const DEFAULT_COMMAND: &str = "help";

/// Join argument tokens with single spaces, falling back to
/// [`DEFAULT_COMMAND`] when there are none.
///
/// Tokens are forwarded as-is: no trimming, no re-splitting, and empty
/// tokens are kept.
pub fn compose_request<S: AsRef<str>>(args: &[S]) -> String {
    if args.is_empty() {
        return DEFAULT_COMMAND.to_string();
    }

    args.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Decode every reply frame as UTF-8 and concatenate them in order.
///
/// A reply with no frames decodes to the empty string.
pub fn decode_reply(frames: &[Bytes]) -> Result<String, ClientError> {
    let mut reply = String::with_capacity(frames.iter().map(Bytes::len).sum());

    for (index, frame) in frames.iter().enumerate() {
        let text =
            std::str::from_utf8(frame).map_err(|source| ClientError::decode(index, source))?;
        reply.push_str(text);
    }

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ---- compose_request ----

    #[test]
    fn arguments_are_joined_with_spaces() {
        assert_eq!(compose_request(&["foo", "bar"]), "foo bar");
    }

    #[test]
    fn no_arguments_sends_help() {
        let args: [&str; 0] = [];
        assert_eq!(compose_request(&args), "help");
    }

    #[test]
    fn single_argument_is_sent_unchanged() {
        assert_eq!(compose_request(&["list"]), "list");
    }

    #[test]
    fn hyphenated_arguments_are_forwarded() {
        let args = vec![
            "service".to_string(),
            "backup".to_string(),
            "--short".to_string(),
        ];
        assert_eq!(compose_request(&args), "service backup --short");
    }

    #[test]
    fn empty_token_is_kept() {
        assert_eq!(compose_request(&["list", ""]), "list ");
    }

    #[test]
    fn token_with_inner_space_is_not_split() {
        assert_eq!(compose_request(&["service", "web server"]), "service web server");
    }

    proptest! {
        #[test]
        fn composed_request_splits_back_into_the_tokens(
            args in prop::collection::vec("[a-z0-9-]{1,8}", 1..6)
        ) {
            let request = compose_request(&args);
            let tokens: Vec<&str> = request.split(' ').collect();
            prop_assert_eq!(tokens, args.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    // ---- decode_reply ----

    #[test]
    fn frames_are_concatenated_without_separator() {
        let frames = vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")];
        assert_eq!(decode_reply(&frames).unwrap(), "abcd");
    }

    #[test]
    fn empty_reply_decodes_to_empty_string() {
        assert_eq!(decode_reply(&[]).unwrap(), "");
    }

    #[test]
    fn multibyte_text_survives_decoding() {
        let frames = vec![Bytes::from("✓ 1.00 "), Bytes::from("backup")];
        assert_eq!(decode_reply(&frames).unwrap(), "✓ 1.00 backup");
    }

    #[test]
    fn invalid_utf8_frame_is_reported_by_index() {
        let frames = vec![Bytes::from_static(b"ok"), Bytes::from_static(&[0xff, 0xfe])];
        match decode_reply(&frames) {
            Err(ClientError::Decode { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}
