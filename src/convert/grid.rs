//! Grid layout strategy: template tracks and per-child placement.
//!
//! Templates become per-track fill weights on the native grid panel. The
//! native panel only understands proportional weights, so absolute track
//! lengths survive only as proportions; mixing `fr` and absolute units is a
//! lossy conversion and is reported once as a warning.

use crate::style::cascade::ResolvedStyle;
use crate::style::length::{resolve_length, resolve_margin, safe_parse_f32};
use crate::style::{HAlign, VAlign};
use crate::toolkit::{Slot, WidgetId, WidgetKind, WidgetTree};

// ---------------------------------------------------------------------------
// Template tracks
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Track {
    /// Fractional unit with its coefficient.
    Fraction(f32),
    /// Absolute length already resolved to toolkit units.
    Absolute(f32),
    Auto,
}

fn parse_track(value: &str) -> Track {
    let value = value.trim();
    if value == "auto" {
        Track::Auto
    } else if let Some(coefficient) = value.strip_suffix("fr") {
        Track::Fraction(safe_parse_f32(coefficient))
    } else {
        Track::Absolute(resolve_length(value, &ResolvedStyle::new()))
    }
}

/// Parse a template string, expanding `repeat(N, value)` groups.
pub fn parse_grid_template(template: &str) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut rest = template.trim();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("repeat(") {
            let Some(close) = after.find(')') else {
                break;
            };
            if let Some((count, value)) = after[..close].split_once(',') {
                let count = count.trim().parse::<usize>().unwrap_or(0);
                let track = parse_track(value);
                tracks.extend(std::iter::repeat(track).take(count));
            }
            rest = after[close + 1..].trim_start();
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            tracks.push(parse_track(&rest[..end]));
            rest = rest[end..].trim_start();
        }
    }
    tracks
}

/// Convert parsed tracks into native per-track fill weights.
///
/// `auto` inherits the nearest explicit track, searching forward first and
/// falling back to the previous explicit track, defaulting to `1fr`.
/// Mixed fr and absolute tracks are normalized against the fr total with a
/// one-time warning; an all-absolute template becomes proportions of the
/// total length.
pub fn tracks_to_fills(tracks: &[Track]) -> Vec<f32> {
    let resolved: Vec<Track> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| match track {
            Track::Auto => tracks[i + 1..]
                .iter()
                .find(|t| !matches!(t, Track::Auto))
                .or_else(|| tracks[..i].iter().rev().find(|t| !matches!(t, Track::Auto)))
                .copied()
                .unwrap_or(Track::Fraction(1.0)),
            other => *other,
        })
        .collect();

    let total_fr: f32 = resolved
        .iter()
        .filter_map(|t| match t {
            Track::Fraction(v) => Some(*v),
            _ => None,
        })
        .sum();
    let total_absolute: f32 = resolved
        .iter()
        .filter_map(|t| match t {
            Track::Absolute(v) => Some(*v),
            _ => None,
        })
        .sum();
    let has_fr = resolved.iter().any(|t| matches!(t, Track::Fraction(_)));
    let has_absolute = resolved.iter().any(|t| matches!(t, Track::Absolute(_)));

    if has_fr && has_absolute {
        log::warn!(
            "grid template mixes fr and absolute units; absolute tracks are \
             converted to fr equivalents and may not size as written"
        );
        // Zero-length absolute tracks have nothing to scale; give them no
        // weight instead of dividing by zero.
        let factor = if total_absolute > 0.0 {
            total_fr / total_absolute
        } else {
            0.0
        };
        resolved
            .iter()
            .map(|t| match t {
                Track::Fraction(v) => *v,
                Track::Absolute(v) => v * factor,
                Track::Auto => unreachable!(),
            })
            .collect()
    } else if has_absolute && total_absolute > 0.0 {
        let count = resolved.len() as f32;
        resolved
            .iter()
            .map(|t| match t {
                Track::Absolute(v) => v / total_absolute * count,
                _ => unreachable!(),
            })
            .collect()
    } else if has_absolute {
        vec![1.0; resolved.len()]
    } else {
        resolved
            .iter()
            .map(|t| match t {
                Track::Fraction(v) => *v,
                _ => unreachable!(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Parse a `gridColumn`/`gridRow` shorthand into a 0-based (start, span).
///
/// Accepts `"N"`, `"span N"`, `"N / M"`, `"N / span M"`, `"span N / M"`, and
/// `"auto"`. `-1` as the end line means the last track. Out-of-range values
/// clamp to the track count; inverted ranges clamp to a zero span.
pub fn parse_grid_line(value: &str, track_count: usize) -> (usize, usize) {
    let value = value.trim();
    if value == "auto" {
        return (0, 1);
    }

    let parts: Vec<&str> = value.split('/').map(str::trim).collect();
    let parse_span = |part: &str| part.strip_prefix("span").map(|n| safe_parse_f32(n) as i64);

    let mut start: i64 = 0;
    let mut span: i64 = 1;
    match parts.as_slice() {
        [single] => {
            if let Some(n) = parse_span(single) {
                span = n;
            } else {
                start = safe_parse_f32(single) as i64 - 1;
            }
        }
        [left, right, ..] => {
            let span_on_left = parse_span(left);
            match span_on_left {
                Some(n) => span = n,
                None => start = if *left == "auto" { 0 } else { safe_parse_f32(left) as i64 - 1 },
            }

            if let Some(n) = parse_span(right) {
                span = n;
            } else {
                // End is a 1-based line; `-1` means the last line.
                let tracks = track_count as i64;
                let num = safe_parse_f32(right) as i64;
                let end = if *right == "-1" { tracks } else { (num - 1).min(tracks) };
                if span_on_left.is_some() {
                    start = end - span;
                } else {
                    span = end - start;
                }
            }
        }
        [] => {}
    }

    (start.max(0) as usize, span.max(0) as usize)
}

/// Resolve an explicit start/end pair, 1-based, span zero when inverted.
fn lines_from_pair(start: Option<f32>, end: Option<f32>) -> (usize, usize) {
    match (start, end) {
        (Some(start), Some(end)) => {
            let start = start as i64 - 1;
            let span = (end as i64 - 1 - start).max(0);
            (start.max(0) as usize, span as usize)
        }
        (Some(start), None) => ((start as i64 - 1).max(0) as usize, 1),
        _ => (0, 1),
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

fn grid_horizontal(token: &str) -> HAlign {
    match token {
        "start" | "left" | "flex-start" => HAlign::Left,
        "end" | "right" | "flex-end" => HAlign::Right,
        "center" => HAlign::Center,
        _ => HAlign::Fill,
    }
}

fn grid_vertical(token: &str) -> VAlign {
    match token {
        "start" | "top" | "flex-start" => VAlign::Top,
        "end" | "bottom" | "flex-end" => VAlign::Bottom,
        "center" => VAlign::Center,
        _ => VAlign::Fill,
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

pub struct GridLayout {
    columns: usize,
    rows: usize,
}

impl GridLayout {
    pub fn new() -> Self {
        Self { columns: 0, rows: 0 }
    }

    pub fn create_widget(&mut self, tree: &mut WidgetTree, style: &ResolvedStyle) -> WidgetId {
        let id = tree.insert(WidgetKind::GridPanel { column_fills: Vec::new(), row_fills: Vec::new() });
        self.apply_templates(tree, id, style);
        id
    }

    /// Re-read both templates from `style` and push fills onto the panel.
    pub fn apply_templates(&mut self, tree: &mut WidgetTree, panel: WidgetId, style: &ResolvedStyle) {
        let columns = style.str("gridTemplateColumns").map(parse_grid_template);
        let rows = style.str("gridTemplateRows").map(parse_grid_template);

        let Some(WidgetKind::GridPanel { column_fills, row_fills }) = tree.kind_mut(panel) else {
            return;
        };
        if let Some(tracks) = columns {
            self.columns = tracks.len();
            *column_fills = tracks_to_fills(&tracks);
        }
        if let Some(tracks) = rows {
            self.rows = tracks.len();
            *row_fills = tracks_to_fills(&tracks);
        }
    }

    pub fn init_slot(
        &self,
        slot: &mut Slot,
        container_style: &ResolvedStyle,
        child_style: &ResolvedStyle,
    ) {
        let (column, column_span) = match child_style.str("gridColumn") {
            Some(shorthand) => parse_grid_line(shorthand, self.columns),
            None => lines_from_pair(
                child_style.number("gridColumnStart"),
                child_style.number("gridColumnEnd"),
            ),
        };
        let (row, row_span) = match child_style.str("gridRow") {
            Some(shorthand) => parse_grid_line(shorthand, self.rows),
            None => lines_from_pair(
                child_style.number("gridRowStart"),
                child_style.number("gridRowEnd"),
            ),
        };

        let placement = slot.grid_mut();
        placement.column = column;
        placement.column_span = column_span;
        placement.row = row;
        placement.row_span = row_span;

        // placeSelf beats the self properties, which beat the container's.
        let (h_token, v_token) = match child_style.str("placeSelf") {
            Some(place) => {
                let mut tokens = place.split_whitespace();
                let h = tokens.next().unwrap_or("stretch");
                (h, tokens.next().unwrap_or(h))
            }
            None => (
                child_style
                    .str("justifySelf")
                    .or_else(|| container_style.str("justifyContent"))
                    .unwrap_or("stretch"),
                child_style
                    .str("alignSelf")
                    .or_else(|| container_style.str("alignItems"))
                    .unwrap_or("stretch"),
            ),
        };
        slot.horizontal = grid_horizontal(h_token);
        slot.vertical = grid_vertical(v_token);

        if let Some(padding) =
            child_style.str("padding").and_then(|p| resolve_margin(p, child_style))
        {
            slot.padding = padding;
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}
