//! Shared `&`-delimited key-value tokenizer used by the authority and response parsers.

// crates.io
use percent_encoding::percent_decode_str;

/// Insertion-ordered parameter mapping with ASCII case-insensitive keys.
///
/// Duplicate keys resolve to the last occurrence; the key keeps the position (and spelling) of
/// its first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterMap {
	entries: Vec<(String, String)>,
}
impl ParameterMap {
	/// Returns the value stored under `key`, compared case-insensitively.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v.as_str())
	}

	/// Returns true when a value is stored under `key`, compared case-insensitively.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true when no parameters were parsed.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	fn insert(&mut self, key: String, value: String) {
		if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
			entry.1 = value;
		} else {
			self.entries.push((key, value));
		}
	}
}

/// Tokenizes a `separator`-delimited, `=`-separated parameter string.
///
/// Empty segments are skipped, a segment without `=` becomes a key with an empty value, and only
/// the first `=` splits so values may contain further `=` characters. Keys and values are
/// percent-decoded (with `+` treated as a space) when `url_decode` is set.
pub fn parse_key_value_list(text: &str, separator: char, url_decode: bool) -> ParameterMap {
	let mut map = ParameterMap::default();

	for segment in text.split(separator) {
		if segment.is_empty() {
			continue;
		}

		let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
		let (key, value) = if url_decode {
			(decode_component(key), decode_component(value))
		} else {
			(key.to_owned(), value.to_owned())
		};

		if key.is_empty() {
			continue;
		}

		map.insert(key, value);
	}

	map
}

fn decode_component(text: &str) -> String {
	let unplussed = text.replace('+', " ");

	percent_decode_str(&unplussed).decode_utf8_lossy().into_owned()
}
