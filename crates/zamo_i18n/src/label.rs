use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// A placeholder substitution value.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Display for ArgValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => {
                // Trim trailing zeros so 2.50 reads as 2.5 and 3.0 as 3.
                let mut s = v.to_string();
                if s.contains('.') {
                    while s.ends_with('0') {
                        s.pop();
                    }
                    if s.ends_with('.') {
                        s.pop();
                    }
                }
                f.write_str(&s)
            }
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for ArgValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Named placeholder values for a lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    entries: Vec<(Cow<'static, str>, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a value, replacing an earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<ArgValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(k, _)| &**k == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Args
where
    K: Into<Cow<'static, str>>,
    V: Into<ArgValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

/// A catalog key plus its placeholder values.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub key: Cow<'static, str>,
    pub args: Args,
}

impl Message {
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            args: Args::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(name, value);
        self
    }
}

/// Display text: either literal (user data, amounts) or a catalog message.
#[derive(Clone, Debug, PartialEq)]
pub enum Label {
    Raw(String),
    Msg(Message),
}

impl Label {
    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    pub fn msg(m: Message) -> Self {
        Self::Msg(m)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<Message> for Label {
    fn from(m: Message) -> Self {
        Self::Msg(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn values_stringify() {
        assert_eq!(ArgValue::from(4).to_string(), "4");
        assert_eq!(ArgValue::from(2.50).to_string(), "2.5");
        assert_eq!(ArgValue::from(3.0).to_string(), "3");
        assert_eq!(ArgValue::from("XAF").to_string(), "XAF");
        assert_eq!(ArgValue::from(true).to_string(), "true");
    }

    #[test]
    fn later_insert_wins() {
        let args = Args::new().arg("count", 4).arg("count", 6);
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("count"), Some(&ArgValue::Int(6)));
    }
}
