//! Key-file reader
//!
//! GLib key-file dialect: `[group]` headers, `key=value` lines, `#`
//! comments. Repeated groups merge, a repeated key keeps the last value.

use contracts::ContractError;

/// One `[group]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    entries: Vec<(String, String)>,
}

impl Group {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Raw (unescaped) string value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Boolean value; `None` when the key is absent
    pub fn get_bool(&self, key: &str) -> Option<Result<bool, ContractError>> {
        self.get(key).map(|value| match value {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ContractError::config_parse(format!(
                "key '{key}' in group [{}] has value '{other}' which cannot be interpreted as a boolean",
                self.name
            ))),
        })
    }

    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Parsed key file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    groups: Vec<Group>,
}

impl KeyFile {
    /// Groups in order of first appearance
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[cfg(test)]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    fn group_index(&mut self, name: &str) -> usize {
        match self.groups.iter().position(|g| g.name == name) {
            Some(idx) => idx,
            None => {
                self.groups.push(Group::new(name));
                self.groups.len() - 1
            }
        }
    }
}

/// Parse key-file text
pub fn parse(content: &str) -> Result<KeyFile, ContractError> {
    let mut key_file = KeyFile::default();
    let mut current: Option<usize> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_start();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.trim_end().strip_suffix(']').ok_or_else(|| {
                ContractError::config_parse(format!(
                    "line {line_no}: invalid group header '{}'",
                    raw.trim()
                ))
            })?;
            if name.is_empty() || name.contains(['[', ']']) {
                return Err(ContractError::config_parse(format!(
                    "line {line_no}: invalid group name '{name}'"
                )));
            }
            current = Some(key_file.group_index(name));
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            ContractError::config_parse(format!(
                "line {line_no}: '{}' is not a group, key-value pair or comment",
                raw.trim()
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(ContractError::config_parse(format!(
                "line {line_no}: empty key name"
            )));
        }

        let group = current.ok_or_else(|| {
            ContractError::config_parse(format!(
                "line {line_no}: key '{key}' appears before any group"
            ))
        })?;

        key_file.groups[group].set(key.to_string(), unescape(value.trim()));
    }

    Ok(key_file)
}

/// Resolve `\s \n \t \r \\` escapes
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of `unescape` for values written back to a key file
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let last = value.chars().count().saturating_sub(1);
    for (idx, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ' ' if idx == 0 || idx == last => out.push_str("\\s"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_and_keys() {
        let content = "\
# sensors
[sensor0]
enable = true
id=CAMERA_ID

[place0]
name = garage
";
        let kf = parse(content).unwrap();
        assert_eq!(kf.groups().len(), 2);

        let sensor = kf.group("sensor0").unwrap();
        assert_eq!(sensor.get("id"), Some("CAMERA_ID"));
        assert!(sensor.get_bool("enable").unwrap().unwrap());
        assert_eq!(sensor.keys().collect::<Vec<_>>(), vec!["enable", "id"]);
    }

    #[test]
    fn test_repeated_group_merges_and_last_key_wins() {
        let content = "[a]\nx=1\n[b]\ny=2\n[a]\nx=3\nz=4\n";
        let kf = parse(content).unwrap();
        assert_eq!(kf.groups().len(), 2);
        let a = kf.group("a").unwrap();
        assert_eq!(a.get("x"), Some("3"));
        assert_eq!(a.get("z"), Some("4"));
    }

    #[test]
    fn test_key_before_group_is_error() {
        let err = parse("id=1\n[sensor0]\n").unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_garbage_line_is_error() {
        let err = parse("[sensor0]\nthis is not valid\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_unterminated_group_is_error() {
        assert!(parse("[sensor0\nid=1\n").is_err());
    }

    #[test]
    fn test_bool_values() {
        let kf = parse("[g]\na=1\nb=0\nc=false\nd=yes\n").unwrap();
        let g = kf.group("g").unwrap();
        assert!(g.get_bool("a").unwrap().unwrap());
        assert!(!g.get_bool("b").unwrap().unwrap());
        assert!(!g.get_bool("c").unwrap().unwrap());
        assert!(g.get_bool("d").unwrap().is_err());
        assert!(g.get_bool("missing").is_none());
    }

    #[test]
    fn test_escape_round_trip() {
        for value in [" padded ", "two\nlines", "back\\slash", "plain text"] {
            let line = format!("[g]\nk={}\n", escape(value));
            let kf = parse(&line).unwrap();
            assert_eq!(kf.group("g").unwrap().get("k"), Some(value));
        }
    }
}
