use flexia_protocol::{is_attribute_separator, Attribute, AttributeSet};

/// How a single dictionary line is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictLine<'a> {
    /// Blank lines, counters and anything else that does not start with a letter.
    Separator,
    /// A surface form followed by its attributes.
    Entry {
        surface: &'a str,
        attributes: AttributeSet,
    },
}

impl<'a> DictLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let starts_with_letter = line.chars().next().is_some_and(char::is_alphabetic);
        if !starts_with_letter {
            return DictLine::Separator;
        }

        let mut fields = line.split(is_attribute_separator).filter(|f| !f.is_empty());
        let Some(surface) = fields.next() else {
            return DictLine::Separator;
        };

        DictLine::Entry {
            surface,
            attributes: fields.filter_map(Attribute::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        assert_eq!(DictLine::classify(""), DictLine::Separator);
        assert_eq!(DictLine::classify("   \t"), DictLine::Separator);
        assert_eq!(DictLine::classify("12"), DictLine::Separator);
        assert_eq!(DictLine::classify("7 котов gen"), DictLine::Separator);
        assert_eq!(DictLine::classify("# comment"), DictLine::Separator);
    }

    #[test]
    fn test_entry_fields() {
        let line = DictLine::classify("котов\tGEN, pl  \r");
        assert_eq!(
            line,
            DictLine::Entry {
                surface: "котов",
                attributes: AttributeSet::parse("gen,pl"),
            }
        );
    }

    #[test]
    fn test_header_without_attributes() {
        match DictLine::classify("СОБАКА") {
            DictLine::Entry { surface, attributes } => {
                assert_eq!(surface, "СОБАКА");
                assert!(attributes.is_empty());
            }
            other => panic!("Expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_padded_line_is_separator() {
        assert_eq!(DictLine::classify("  кошка noun"), DictLine::Separator);
        assert_eq!(DictLine::classify("\tСОБАКА"), DictLine::Separator);
    }
}
