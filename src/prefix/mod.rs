//! IRC message prefix (source) views.
//!
//! A prefix identifies the origin of a message: either a server name or a
//! user's `nick!user@host` mask. The codec stores the prefix as a plain
//! string; [`PrefixRef`] splits it on demand without allocating.

use std::fmt;

/// Borrowed view of a message prefix.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum PrefixRef<'a> {
    /// Server name (e.g. `irc.example.com`).
    ServerName(&'a str),
    /// User mask: (nickname, username, hostname). Missing parts are empty.
    Nickname(&'a str, &'a str, &'a str),
}

impl<'a> PrefixRef<'a> {
    /// Split a prefix string.
    ///
    /// This is lenient and never fails. A name containing a dot and no
    /// `!` or `@` is taken to be a server name.
    ///
    /// ```
    /// use slirc_line::PrefixRef;
    ///
    /// assert_eq!(
    ///     PrefixRef::parse("dan-!d@localhost"),
    ///     PrefixRef::Nickname("dan-", "d", "localhost")
    /// );
    /// assert_eq!(PrefixRef::parse("irc.example.com"), PrefixRef::ServerName("irc.example.com"));
    /// ```
    pub fn parse(s: &'a str) -> Self {
        let (name_user, host) = match s.find('@') {
            Some(at) => (&s[..at], &s[at + 1..]),
            None => (s, ""),
        };
        let (name, user) = match name_user.find('!') {
            Some(bang) => (&name_user[..bang], &name_user[bang + 1..]),
            None => (name_user, ""),
        };

        if name.len() == s.len() && name.contains('.') {
            PrefixRef::ServerName(name)
        } else {
            PrefixRef::Nickname(name, user, host)
        }
    }

    /// The nickname, if this is a user prefix with a non-empty nick.
    pub fn nick(&self) -> Option<&'a str> {
        match *self {
            PrefixRef::Nickname(nick, _, _) if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }

    /// The username, if present.
    pub fn user(&self) -> Option<&'a str> {
        match *self {
            PrefixRef::Nickname(_, user, _) if !user.is_empty() => Some(user),
            _ => None,
        }
    }

    /// The hostname, or the server name for server prefixes.
    pub fn host(&self) -> Option<&'a str> {
        match *self {
            PrefixRef::ServerName(name) => Some(name),
            PrefixRef::Nickname(_, _, host) if !host.is_empty() => Some(host),
            _ => None,
        }
    }
}

impl fmt::Display for PrefixRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PrefixRef::ServerName(name) => f.write_str(name),
            PrefixRef::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{}", user)?;
                }
                if !host.is_empty() {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}
