use crate::schema::{FALLBACK_TITLE, IdeaRecord};
use crate::values::{clean_title, extract_number, value_after_marker};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Lines must be longer than this to count as a description
pub const DESCRIPTION_MIN_CHARS: usize = 40;

/// Characters of raw text kept in the fallback record
pub const FALLBACK_DESCRIPTION_CHARS: usize = 800;

static IDEA_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Idea\s+[1-3]").expect("valid idea heading regex"));

const INLINE_MARKERS: [&str; 3] = ["Idea 1:", "Idea 2:", "Idea 3:"];

/// A single trimmed, non-blank line plus its lowercase form
struct Line<'a> {
    text: &'a str,
    lower: String,
}

impl<'a> Line<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            lower: text.to_lowercase(),
        }
    }

    fn mentions(&self, keyword: &str) -> bool {
        self.lower.contains(keyword)
    }
}

/// One row of the field table: when it applies and what it writes.
struct FieldRule {
    field: &'static str,
    applies: fn(&IdeaRecord, &Line) -> bool,
    apply: fn(&mut IdeaRecord, &Line),
    /// A consuming rule stops later rules from seeing the line
    consumes: bool,
}

static FIELD_RULES: [FieldRule; 4] = [
    FieldRule {
        field: "description",
        applies: |idea, line| {
            idea.description.is_empty()
                && line.text.chars().count() > DESCRIPTION_MIN_CHARS
                && !["cost", "profit", "risk"].iter().any(|k| line.mentions(k))
        },
        apply: |idea, line| idea.description = line.text.to_string(),
        consumes: true,
    },
    FieldRule {
        field: "estimated_cost",
        applies: |_, line| line.mentions("cost") || line.text.contains('$'),
        apply: |idea, line| idea.estimated_cost = extract_number(line.text),
        consumes: false,
    },
    FieldRule {
        field: "profit_outlook",
        applies: |_, line| line.mentions("profit") && line.text.contains('%'),
        apply: |idea, line| idea.profit_outlook = value_after_marker(line.text),
        consumes: false,
    },
    FieldRule {
        field: "risk_level",
        applies: |_, line| line.mentions("risk"),
        apply: |idea, line| idea.risk_level = value_after_marker(line.text),
        consumes: false,
    },
];

/// Does this line start a new idea?
pub fn is_idea_boundary(line: &str) -> bool {
    IDEA_HEADING_RE.is_match(line)
        || line.starts_with("**Idea")
        || INLINE_MARKERS.iter().any(|m| line.contains(m))
}

fn apply_field_rules(idea: &mut IdeaRecord, text: &str) {
    let line = Line::new(text);
    for rule in &FIELD_RULES {
        if (rule.applies)(idea, &line) {
            (rule.apply)(idea, &line);
            debug!(field = rule.field, line = text, "Matched idea field");
            if rule.consumes {
                break;
            }
        }
    }
}

/// Split plain text into idea records, in order of appearance.
///
/// Lines before the first boundary are ignored. Always returns at least one
/// record: text without any boundary becomes a single "Raw AI Response".
pub fn segment(text: &str) -> Vec<IdeaRecord> {
    let (mut ideas, open) = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(
            (Vec::new(), None::<IdeaRecord>),
            |(mut ideas, open), line| {
                if is_idea_boundary(line) {
                    ideas.extend(open);
                    return (ideas, Some(IdeaRecord::titled(clean_title(line))));
                }

                let open = open.map(|mut idea| {
                    apply_field_rules(&mut idea, line);
                    idea
                });
                (ideas, open)
            },
        );
    ideas.extend(open);

    if ideas.is_empty() {
        warn!(bytes = text.len(), "No idea markers found, returning raw response");
        return vec![fallback_record(text)];
    }

    debug!(count = ideas.len(), "Segmented ideas");
    ideas
}

fn fallback_record(text: &str) -> IdeaRecord {
    let description = if text.chars().count() > FALLBACK_DESCRIPTION_CHARS {
        let mut head: String = text.chars().take(FALLBACK_DESCRIPTION_CHARS).collect();
        head.push_str("...");
        head
    } else {
        text.to_string()
    };

    IdeaRecord {
        description,
        ..IdeaRecord::titled(FALLBACK_TITLE)
    }
}
