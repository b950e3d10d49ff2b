//! Request parsing for the cache shell
//!
//! Turns one line of input into a typed command.

use std::time::Duration;

use crate::error::{CacheError, Result};

/// A parsed shell command.
///
/// # Syntax
/// - `put <key> <value> [ttl_ms]`
/// - `get <key>` / `peek <key>` / `del <key>`
/// - `head`, `tail`, `keys`, `purge`, `stats`, `capacity`, `clear`
/// - `quit` / `exit`
///
/// Arguments are separated by whitespace. A key or value containing spaces
/// is written in double quotes (`put greeting "hello world"`); there are no
/// escapes inside quotes. Extra arguments are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Put {
        key: String,
        value: String,
        /// Ignored by the cache unless it is at least one millisecond
        ttl: Option<Duration>,
    },
    Get { key: String },
    Peek { key: String },
    Delete { key: String },
    Head,
    Tail,
    Keys,
    Purge,
    Stats,
    Capacity,
    Clear,
    Quit,
}

impl Request {
    /// Parses a single input line.
    ///
    /// Returns `Ok(None)` for blank lines. The ttl must be a whole number of
    /// milliseconds; zero or negative values are accepted and leave the
    /// entry without a new expiry.
    pub fn parse(line: &str) -> Result<Option<Request>> {
        let mut parts = tokenize(line)?.into_iter();
        let Some(command) = parts.next() else {
            return Ok(None);
        };
        let command = command.to_ascii_lowercase();

        let request = match command.as_str() {
            "put" | "set" => {
                let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                    return Err(CacheError::InvalidRequest(
                        "put requires a key and a value".to_string(),
                    ));
                };
                let ttl = match parts.next() {
                    Some(ttl) => parse_ttl(&ttl)?,
                    None => None,
                };
                Request::Put { key, value, ttl }
            }
            "get" => Request::Get {
                key: required_key(&command, parts.next())?,
            },
            "peek" => Request::Peek {
                key: required_key(&command, parts.next())?,
            },
            "del" | "delete" | "remove" => Request::Delete {
                key: required_key(&command, parts.next())?,
            },
            "head" => Request::Head,
            "tail" => Request::Tail,
            "keys" => Request::Keys,
            "purge" => Request::Purge,
            "stats" => Request::Stats,
            "capacity" => Request::Capacity,
            "clear" => Request::Clear,
            "quit" | "exit" => Request::Quit,
            _ => return Err(CacheError::UnknownCommand(command)),
        };

        if let Some(extra) = parts.next() {
            return Err(CacheError::InvalidRequest(format!(
                "unexpected argument '{}' for {} (quote values containing spaces)",
                extra, command
            )));
        }

        Ok(Some(request))
    }
}

fn required_key(command: &str, key: Option<String>) -> Result<String> {
    key.ok_or_else(|| CacheError::InvalidRequest(format!("{} requires a key", command)))
}

/// Positive milliseconds become a ttl; zero and negatives mean "no ttl".
fn parse_ttl(token: &str) -> Result<Option<Duration>> {
    let millis: i128 = token.parse().map_err(|_| {
        CacheError::InvalidRequest(format!(
            "ttl must be a whole number of milliseconds, got '{}' (quote values containing spaces)",
            token
        ))
    })?;

    Ok((millis > 0).then(|| Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))))
}

/// Splits on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => {
                        return Err(CacheError::InvalidRequest(
                            "unterminated quote".to_string(),
                        ))
                    }
                }
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put() {
        let req = Request::parse("put test hello").unwrap().unwrap();
        assert_eq!(
            req,
            Request::Put {
                key: "test".to_string(),
                value: "hello".to_string(),
                ttl: None,
            }
        );
    }

    #[test]
    fn test_parse_put_with_ttl() {
        let req = Request::parse("PUT test hello 1500").unwrap().unwrap();
        assert!(matches!(req, Request::Put { ttl: Some(ttl), .. } if ttl == Duration::from_millis(1500)));
    }

    #[test]
    fn test_parse_put_non_positive_ttl_is_dropped() {
        for line in ["put k v 0", "put k v -5"] {
            let req = Request::parse(line).unwrap().unwrap();
            assert!(matches!(req, Request::Put { ttl: None, .. }), "{}", line);
        }
    }

    #[test]
    fn test_parse_put_rejects_non_numeric_ttl() {
        for line in ["put k v soon", "put k v 1.5"] {
            let result = Request::parse(line);
            assert!(matches!(result, Err(CacheError::InvalidRequest(_))), "{}", line);
        }
    }

    #[test]
    fn test_parse_put_huge_ttl_saturates() {
        let req = Request::parse("put k v 99999999999999999999999").unwrap().unwrap();
        assert!(matches!(req, Request::Put { ttl: Some(ttl), .. } if ttl == Duration::from_millis(u64::MAX)));
    }

    #[test]
    fn test_parse_put_unquoted_multi_word_value_is_rejected() {
        let result = Request::parse("put greeting hello world");
        assert!(matches!(result, Err(CacheError::InvalidRequest(msg)) if msg.contains("world")));
    }

    #[test]
    fn test_parse_put_quoted_value() {
        let req = Request::parse(r#"put greeting "hello  world" 100"#).unwrap().unwrap();
        assert_eq!(
            req,
            Request::Put {
                key: "greeting".to_string(),
                value: "hello  world".to_string(),
                ttl: Some(Duration::from_millis(100)),
            }
        );

        let req = Request::parse(r#"put "my key" """#).unwrap().unwrap();
        assert!(matches!(req, Request::Put { key, value, .. } if key == "my key" && value.is_empty()));
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let result = Request::parse(r#"put k "never closed"#);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_rejects_extra_arguments() {
        for line in ["put k v 100 junk", "get a b", "keys all", "quit now"] {
            let result = Request::parse(line);
            assert!(matches!(result, Err(CacheError::InvalidRequest(_))), "{}", line);
        }
    }

    #[test]
    fn test_parse_put_missing_value() {
        let result = Request::parse("put lonely");
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_key_commands() {
        assert_eq!(
            Request::parse("get a").unwrap(),
            Some(Request::Get { key: "a".to_string() })
        );
        assert_eq!(
            Request::parse("  peek   b ").unwrap(),
            Some(Request::Peek { key: "b".to_string() })
        );
        assert_eq!(
            Request::parse("del c").unwrap(),
            Some(Request::Delete { key: "c".to_string() })
        );
        assert!(matches!(
            Request::parse("get"),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(Request::parse("head").unwrap(), Some(Request::Head));
        assert_eq!(Request::parse("Tail").unwrap(), Some(Request::Tail));
        assert_eq!(Request::parse("keys").unwrap(), Some(Request::Keys));
        assert_eq!(Request::parse("exit").unwrap(), Some(Request::Quit));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Request::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_command() {
        let result = Request::parse("frobnicate x");
        assert!(matches!(result, Err(CacheError::UnknownCommand(cmd)) if cmd == "frobnicate"));
    }
}
