//! Built-in lookup transforms: `quote`, `lower`, `upper`, `camel`, `mixed`.
//!
//! The word-splitting algorithm is ported byte-for-byte from
//! `original_source/source/case.c`'s `strip_symbol`/`scan_symbol`, rather
//! than delegated to the `convert_case` crate's own boundary rules, since
//! the two don't necessarily agree on edge cases like a run of leading
//! underscores or an acronym immediately followed by a lower-case word
//! (`"ABCdef"` splits as `"AB"` + `"Cdef"`, donating the acronym's last
//! letter to the following word).

/// Strips leading and trailing underscores, returning the inner slice plus
/// the leading/trailing underscore runs that were removed.
fn split_symbol(s: &str) -> (&str, &str, &str) {
	let leading_len = s.len() - s.trim_start_matches('_').len();
	let trailing_len = s.len() - s.trim_end_matches('_').len();
	let inner_end = s.len() - trailing_len;
	if leading_len >= inner_end {
		return (s, "", "");
	}
	(&s[..leading_len], &s[leading_len..inner_end], &s[inner_end..])
}

/// Finds the next word in `inner` starting at byte offset `pos`, skipping
/// any underscores between words. Returns the word's byte range, or `None`
/// once every word has been consumed.
fn scan_symbol(inner: &str, pos: usize) -> Option<(usize, usize)> {
	let bytes = inner.as_bytes();
	let mut p = pos;
	while p < bytes.len() && bytes[p] == b'_' {
		p += 1;
	}
	if p == bytes.len() {
		return None;
	}
	let start = p;

	if bytes[p].is_ascii_digit() {
		while p < bytes.len() && bytes[p].is_ascii_digit() {
			p += 1;
		}
		return Some((start, p));
	}

	if bytes[p].is_ascii_lowercase() {
		while p < bytes.len() && bytes[p].is_ascii_lowercase() {
			p += 1;
		}
		return Some((start, p));
	}

	if bytes[p].is_ascii_uppercase() {
		while p < bytes.len() && bytes[p].is_ascii_uppercase() {
			p += 1;
		}
		// An acronym immediately followed by a lower-case word donates its
		// last letter to that word, unless the acronym is a single letter,
		// in which case the whole following word joins it instead.
		if p < bytes.len() && bytes[p].is_ascii_lowercase() {
			p -= 1;
			if p == start {
				// The acronym was a single letter: it joins the lower-case
				// word that follows instead of splitting from it, so consume
				// at least one more byte before re-checking.
				p += 1;
				while p < bytes.len() && bytes[p].is_ascii_lowercase() {
					p += 1;
				}
			}
		}
		return Some((start, p));
	}

	// Identifiers are lexed as [_a-zA-Z0-9]+, so every byte reaching here
	// is one of those; this arm only exists to guarantee termination.
	Some((start, p + 1))
}

fn words(inner: &str) -> Vec<&str> {
	let mut out = Vec::new();
	let mut pos = 0;
	while let Some((start, end)) = scan_symbol(inner, pos) {
		out.push(&inner[start..end]);
		pos = end;
	}
	out
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	let Some(first) = chars.next() else {
		return String::new();
	};
	let mut out = String::with_capacity(word.len());
	out.push(first.to_ascii_uppercase());
	for c in chars {
		out.push(c.to_ascii_lowercase());
	}
	out
}

/// `"name"`: the bare name, double-quoted.
#[must_use]
pub fn quote(name: &str) -> String {
	format!("\"{name}\"")
}

/// `lower_case_words`, joined by underscores.
#[must_use]
pub fn lower(name: &str) -> String {
	let (leading, inner, trailing) = split_symbol(name);
	let mut out = String::from(leading);
	for (i, word) in words(inner).into_iter().enumerate() {
		if i > 0 {
			out.push('_');
		}
		out.push_str(&word.to_ascii_lowercase());
	}
	out.push_str(trailing);
	out
}

/// `UPPER_CASE_WORDS`, joined by underscores.
#[must_use]
pub fn upper(name: &str) -> String {
	let (leading, inner, trailing) = split_symbol(name);
	let mut out = String::from(leading);
	for (i, word) in words(inner).into_iter().enumerate() {
		if i > 0 {
			out.push('_');
		}
		out.push_str(&word.to_ascii_uppercase());
	}
	out.push_str(trailing);
	out
}

/// `CamelCaseWords`, with every word capitalized and no separator.
#[must_use]
pub fn camel(name: &str) -> String {
	let (leading, inner, trailing) = split_symbol(name);
	let mut out = String::from(leading);
	for word in words(inner) {
		out.push_str(&capitalize(word));
	}
	out.push_str(trailing);
	out
}

/// `mixedCaseWords`, the first word lower-case and the rest capitalized.
#[must_use]
pub fn mixed(name: &str) -> String {
	let (leading, inner, trailing) = split_symbol(name);
	let mut out = String::from(leading);
	let mut words_iter = words(inner).into_iter();
	if let Some(first) = words_iter.next() {
		out.push_str(&first.to_ascii_lowercase());
	}
	for word in words_iter {
		out.push_str(&capitalize(word));
	}
	out.push_str(trailing);
	out
}

type TransformFn = fn(&str) -> String;

/// The built-in lookup transform names, mapped to their implementations.
/// A `phf` map gives this dispatch table the same constant, perfect-hash
/// lookup the root scope's keyword table uses, rather than a `match` that
/// would need to be kept in sync with the function list by hand.
static TRANSFORMS: phf::Map<&'static str, TransformFn> = phf::phf_map! {
	"quote" => quote,
	"lower" => lower,
	"upper" => upper,
	"camel" => camel,
	"mixed" => mixed,
};

/// Looks up a built-in transform by name, returning `None` if `name` does
/// not match one of `quote`/`lower`/`upper`/`camel`/`mixed`.
#[must_use]
pub fn apply(transform_name: &str, item_name: &str) -> Option<String> {
	TRANSFORMS.get(transform_name).map(|f| f(item_name))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lower_splits_on_case_and_digit_boundaries() {
		assert_eq!(lower("fooBar42Baz"), "foo_bar42_baz");
	}

	#[test]
	fn upper_joins_with_underscores() {
		assert_eq!(upper("fooBar"), "FOO_BAR");
	}

	#[test]
	fn camel_capitalizes_every_word() {
		assert_eq!(camel("foo_bar_baz"), "FooBarBaz");
	}

	#[test]
	fn mixed_lowercases_only_the_first_word() {
		assert_eq!(mixed("FooBarBaz"), "fooBarBaz");
	}

	#[test]
	fn acronym_donates_last_letter_to_following_word() {
		assert_eq!(lower("ABCdef"), "ab_cdef");
	}

	#[test]
	fn single_letter_acronym_joins_following_word_wholesale() {
		assert_eq!(lower("Cdef"), "cdef");
	}

	#[test]
	fn leading_and_trailing_underscores_are_preserved() {
		assert_eq!(lower("__foo_bar__"), "__foo_bar__");
		assert_eq!(camel("__fooBar"), "__FooBar");
	}

	#[test]
	fn quote_wraps_in_double_quotes() {
		assert_eq!(quote("foo"), "\"foo\"");
	}

	#[test]
	fn apply_dispatches_by_name_and_rejects_unknown() {
		assert_eq!(apply("upper", "foo"), Some("FOO".to_string()));
		assert_eq!(apply("reverse", "foo"), None);
	}
}
