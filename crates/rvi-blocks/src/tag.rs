//! Canonical block type tags.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical visual-block type.
///
/// The set is closed: every directive resolves to exactly one variant,
/// with anything unrecognized folding into [`TypeTag::Fallback`]. This
/// keeps renderer dispatch total — there is no "unknown type" state
/// past the parsing boundary.
///
/// # Example
///
/// ```
/// use rvi_blocks::TypeTag;
///
/// assert_eq!(TypeTag::parse("keypoints"), TypeTag::Keypoints);
/// assert_eq!(TypeTag::parse("Cause_Effect"), TypeTag::CauseEffect);
/// assert_eq!(TypeTag::parse("unheard-of"), TypeTag::Fallback);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Bulleted key points / highlights.
    Keypoints,
    /// Option grid with pros, cons and attributes.
    Comparison,
    /// Ordered step sequence.
    Steps,
    /// Checkable item list.
    Checklist,
    /// Chronological events.
    Timeline,
    /// Gains-versus-costs sections.
    Tradeoffs,
    /// Cause → effect pairs.
    CauseEffect,
    /// Metric cards with trend and target.
    Metrics,
    /// Opaque content rendered as preformatted text.
    Fallback,
}

impl TypeTag {
    /// All canonical tags in display order. `Fallback` is last.
    pub const ALL: [Self; 9] = [
        Self::Keypoints,
        Self::Comparison,
        Self::Steps,
        Self::Checklist,
        Self::Timeline,
        Self::Tradeoffs,
        Self::CauseEffect,
        Self::Metrics,
        Self::Fallback,
    ];

    /// Parse a type string into a tag.
    ///
    /// Matching is case-insensitive and collapses hyphen/underscore
    /// variants (`cause_effect`, `causeeffect`) plus singular/plural
    /// spellings of the aliased families. Anything else resolves to
    /// [`TypeTag::Fallback`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "keypoints" | "keypoint" | "keycard" => Self::Keypoints,
            "comparison" | "compare" => Self::Comparison,
            "steps" => Self::Steps,
            "checklist" => Self::Checklist,
            "timeline" => Self::Timeline,
            "tradeoffs" | "tradeoff" => Self::Tradeoffs,
            "causeeffect" => Self::CauseEffect,
            "metrics" | "metric" => Self::Metrics,
            _ => Self::Fallback,
        }
    }

    /// Canonical kebab-case name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keypoints => "keypoints",
            Self::Comparison => "comparison",
            Self::Steps => "steps",
            Self::Checklist => "checklist",
            Self::Timeline => "timeline",
            Self::Tradeoffs => "tradeoffs",
            Self::CauseEffect => "cause-effect",
            Self::Metrics => "metrics",
            Self::Fallback => "fallback",
        }
    }

    /// Human display label for chips and headings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Keypoints => "Key points",
            Self::Comparison => "Comparison",
            Self::Steps => "Steps",
            Self::Checklist => "Checklist",
            Self::Timeline => "Timeline",
            Self::Tradeoffs => "Trade-offs",
            Self::CauseEffect => "Cause & effect",
            Self::Metrics => "Metrics",
            Self::Fallback => "Details",
        }
    }
}

impl Default for TypeTag {
    fn default() -> Self {
        Self::Fallback
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::parse(tag.as_str()), tag);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(TypeTag::parse("KEYPOINTS"), TypeTag::Keypoints);
        assert_eq!(TypeTag::parse("Timeline"), TypeTag::Timeline);
    }

    #[test]
    fn test_separator_variants() {
        assert_eq!(TypeTag::parse("cause-effect"), TypeTag::CauseEffect);
        assert_eq!(TypeTag::parse("cause_effect"), TypeTag::CauseEffect);
        assert_eq!(TypeTag::parse("causeeffect"), TypeTag::CauseEffect);
        assert_eq!(TypeTag::parse("trade_offs"), TypeTag::Tradeoffs);
        assert_eq!(TypeTag::parse("trade-off"), TypeTag::Tradeoffs);
    }

    #[test]
    fn test_unknown_is_fallback() {
        assert_eq!(TypeTag::parse(""), TypeTag::Fallback);
        assert_eq!(TypeTag::parse("pie-chart"), TypeTag::Fallback);
        assert_eq!(TypeTag::parse("   "), TypeTag::Fallback);
    }

    #[test]
    fn test_serde_wire_shape() {
        let json = serde_json::to_string(&TypeTag::CauseEffect).unwrap();
        assert_eq!(json, r#""cause-effect""#);

        let tag: TypeTag = serde_json::from_str(r#""no-such-type""#).unwrap();
        assert_eq!(tag, TypeTag::Fallback);
    }
}
