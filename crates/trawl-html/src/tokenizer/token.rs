//! Token types emitted by the tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! "The output of the tokenization step is a series of zero or more of the
//! following tokens: DOCTYPE, start tag, end tag, comment, character,
//! end-of-file."

use core::fmt;

/// An attribute on a tag token. The name keeps its source casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// Attribute value with character references decoded.
    pub value: String,
}

impl Attribute {
    /// Create an attribute.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A token produced by [`HTMLTokenizer`](super::HTMLTokenizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing."
    Doctype {
        /// Lowercased doctype name.
        name: Option<String>,
        /// Public identifier, if present.
        public_identifier: Option<String>,
        /// System identifier, if present.
        system_identifier: Option<String>,
        /// "force-quirks flag"
        force_quirks: bool,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes."
    StartTag {
        /// Tag name with source casing.
        name: String,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
        /// Attributes in source order, duplicates already dropped.
        attributes: Vec<Attribute>,
    },

    /// End tag. Attributes are parsed but always emptied before emission.
    EndTag {
        /// Tag name with source casing.
        name: String,
        /// Scratch list used while tokenizing; empty once emitted.
        attributes: Vec<Attribute>,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// Comment text without the delimiters.
        data: String,
    },

    /// A single decoded code point.
    Character {
        /// The character.
        data: char,
    },

    /// Emitted exactly once, as the last token.
    EndOfFile,
}

impl Token {
    /// New DOCTYPE token with every field missing.
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
        }
    }

    /// New start tag with an empty name.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// New end tag with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
            attributes: Vec::new(),
        }
    }

    /// New comment with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// New character token.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Convenience constructor for tests and synthetic token streams.
    #[must_use]
    pub fn start_tag(name: &str, attributes: &[(&str, &str)]) -> Self {
        Self::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: attributes
                .iter()
                .map(|(n, v)| Attribute::new((*n).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Convenience constructor for tests and synthetic token streams.
    #[must_use]
    pub fn end_tag(name: &str) -> Self {
        Self::EndTag {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Whether this is the end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    // ===== Mutators used by the state machine =====
    //
    // Each mutator is only ever called while the tokenizer is building a token
    // of the matching kind; a mismatch is a tokenizer bug, hence the panics.

    /// "Append the current input character to the current DOCTYPE token's name."
    ///
    /// # Panics
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_doctype_name(&mut self, c: char) {
        match self {
            Self::Doctype { name, .. } => name.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_doctype_name called on non-DOCTYPE token"),
        }
    }

    /// "Set the DOCTYPE token's public identifier to the empty string (not missing)"
    ///
    /// # Panics
    /// Panics if called on a non-DOCTYPE token.
    pub fn begin_public_identifier(&mut self) {
        match self {
            Self::Doctype {
                public_identifier, ..
            } => *public_identifier = Some(String::new()),
            _ => panic!("begin_public_identifier called on non-DOCTYPE token"),
        }
    }

    /// "Append the current input character to the current DOCTYPE token's public identifier."
    ///
    /// # Panics
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_public_identifier(&mut self, c: char) {
        match self {
            Self::Doctype {
                public_identifier, ..
            } => public_identifier.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_public_identifier called on non-DOCTYPE token"),
        }
    }

    /// "Set the DOCTYPE token's system identifier to the empty string (not missing)"
    ///
    /// # Panics
    /// Panics if called on a non-DOCTYPE token.
    pub fn begin_system_identifier(&mut self) {
        match self {
            Self::Doctype {
                system_identifier, ..
            } => *system_identifier = Some(String::new()),
            _ => panic!("begin_system_identifier called on non-DOCTYPE token"),
        }
    }

    /// "Append the current input character to the current DOCTYPE token's system identifier."
    ///
    /// # Panics
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_system_identifier(&mut self, c: char) {
        match self {
            Self::Doctype {
                system_identifier, ..
            } => system_identifier.get_or_insert_with(String::new).push(c),
            _ => panic!("append_to_system_identifier called on non-DOCTYPE token"),
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    ///
    /// # Panics
    /// Panics if called on a non-DOCTYPE token.
    pub fn set_force_quirks(&mut self) {
        match self {
            Self::Doctype { force_quirks, .. } => *force_quirks = true,
            _ => panic!("set_force_quirks called on non-DOCTYPE token"),
        }
    }

    /// "Append the current input character to the current tag token's tag name."
    ///
    /// # Panics
    /// Panics if called on a non-tag token.
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => name.push(c),
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// "Set the self-closing flag of the current tag token."
    ///
    /// Ignored for end tags, which report `end-tag-with-trailing-solidus` instead.
    ///
    /// # Panics
    /// Panics if called on a non-tag token.
    pub fn set_self_closing(&mut self) {
        match self {
            Self::StartTag { self_closing, .. } => *self_closing = true,
            Self::EndTag { .. } => {}
            _ => panic!("set_self_closing called on non-tag token"),
        }
    }

    /// "Append the current input character to the comment token's data."
    ///
    /// # Panics
    /// Panics if called on a non-comment token.
    pub fn append_to_comment(&mut self, c: char) {
        match self {
            Self::Comment { data } => data.push(c),
            _ => panic!("append_to_comment called on non-comment token"),
        }
    }

    /// Append a string to the comment token's data.
    ///
    /// # Panics
    /// Panics if called on a non-comment token.
    pub fn append_str_to_comment(&mut self, s: &str) {
        match self {
            Self::Comment { data } => data.push_str(s),
            _ => panic!("append_str_to_comment called on non-comment token"),
        }
    }

    /// "Start a new attribute in the current tag token."
    ///
    /// # Panics
    /// Panics if called on a non-tag token.
    pub fn start_new_attribute(&mut self) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                attributes.push(Attribute::new(String::new(), String::new()));
            }
            _ => panic!("start_new_attribute called on non-tag token"),
        }
    }

    /// "Append the current input character to the current attribute's name."
    ///
    /// # Panics
    /// Panics if called on a non-tag token.
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                if let Some(attr) = attributes.last_mut() {
                    attr.name.push(c);
                }
            }
            _ => panic!("append_to_current_attribute_name called on non-tag token"),
        }
    }

    /// "Append the current input character to the current attribute's value."
    ///
    /// # Panics
    /// Panics if called on a non-tag token.
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                if let Some(attr) = attributes.last_mut() {
                    attr.value.push(c);
                }
            }
            _ => panic!("append_to_current_attribute_value called on non-tag token"),
        }
    }

    /// "If there is already an attribute on the token with the exact same name"
    ///
    /// Names are compared ASCII case-insensitively because tag tokens keep
    /// source casing instead of lowercasing.
    #[must_use]
    pub fn current_attribute_name_is_duplicate(&self) -> bool {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                attributes.split_last().is_some_and(|(current, earlier)| {
                    earlier
                        .iter()
                        .any(|attr| attr.name.eq_ignore_ascii_case(&current.name))
                })
            }
            _ => false,
        }
    }

    /// "the new attribute must be removed from the token"
    ///
    /// # Panics
    /// Panics if called on a non-tag token.
    pub fn remove_current_attribute(&mut self) {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                let _ = attributes.pop();
            }
            _ => panic!("remove_current_attribute called on non-tag token"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
