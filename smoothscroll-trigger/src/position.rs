use core::str::FromStr;

use alloc::string::ToString;

use smoothscroll::Bounds;

use crate::Error;

/// A point along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// A fraction of the size: `top` is `0.0`, `center` is `0.5`, `bottom` is `1.0`.
    Fraction(f64),
    /// A fixed distance from the start.
    Pixels(f64),
}

impl Edge {
    pub fn resolve(self, size: f64) -> f64 {
        match self {
            Self::Fraction(f) => size * f,
            Self::Pixels(px) => px,
        }
    }
}

/// An [`Edge`] plus a pixel adjustment (`"top+=100"`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub edge: Edge,
    pub adjust: f64,
}

impl Anchor {
    pub fn new(edge: Edge) -> Self {
        Self { edge, adjust: 0.0 }
    }

    pub fn resolve(self, size: f64) -> f64 {
        self.edge.resolve(size) + self.adjust
    }
}

/// Where a trigger boundary sits: "when `element` meets `viewport`".
///
/// Parsed from `"<element> <viewport>"`, for example `"top 80%"` (the element's top reaches
/// 80% down the viewport) or `"bottom top+=20"`. Each side accepts `top`/`start`,
/// `center`, `bottom`/`end`, `<n>%`, `<n>px` or a bare number of pixels, optionally followed
/// by `+=<n>` or `-=<n>`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerPosition {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPosition {
    pub fn new(element: Edge, viewport: Edge) -> Self {
        Self {
            element: Anchor::new(element),
            viewport: Anchor::new(viewport),
        }
    }

    /// `"top bottom"`: the element's top enters from the bottom of the viewport.
    pub fn default_start() -> Self {
        Self::new(Edge::Fraction(0.0), Edge::Fraction(1.0))
    }

    /// `"bottom top"`: the element's bottom leaves through the top of the viewport.
    pub fn default_end() -> Self {
        Self::new(Edge::Fraction(1.0), Edge::Fraction(0.0))
    }

    /// The scroll offset at which the two anchors line up.
    pub fn scroll_offset(&self, element: Bounds, viewport: f64) -> f64 {
        element.start + self.element.resolve(element.size) - self.viewport.resolve(viewport)
    }
}

fn finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_edge(token: &str) -> Option<Edge> {
    let edge = match token {
        "top" | "start" | "left" => Edge::Fraction(0.0),
        "center" => Edge::Fraction(0.5),
        "bottom" | "end" | "right" => Edge::Fraction(1.0),
        _ => {
            if let Some(pct) = token.strip_suffix('%') {
                Edge::Fraction(finite(pct)? / 100.0)
            } else {
                let px = token.strip_suffix("px").unwrap_or(token);
                Edge::Pixels(finite(px)?)
            }
        }
    };
    Some(edge)
}

fn parse_anchor(token: &str) -> Option<Anchor> {
    let (edge, adjust) = match (token.find("+="), token.find("-=")) {
        (Some(i), _) => (&token[..i], finite(&token[i + 2..])?),
        (None, Some(i)) => (&token[..i], -finite(&token[i + 2..])?),
        (None, None) => (token, 0.0),
    };
    Some(Anchor {
        edge: parse_edge(edge)?,
        adjust,
    })
}

impl FromStr for TriggerPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPosition {
            input: s.to_string(),
        };
        let mut tokens = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(invalid());
        };
        Ok(Self {
            element: parse_anchor(element).ok_or_else(invalid)?,
            viewport: parse_anchor(viewport).ok_or_else(invalid)?,
        })
    }
}
