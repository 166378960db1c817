use crate::{
    document::tree::{Element, NodeRole},
    foundation::config::TrackedTeam,
    plan::replacements::ReplacementSet,
};

#[derive(Clone, Copy, Debug)]
/// Fill colors for team texts.
pub struct TeamColors<'a> {
    /// Substring identifying the tracked team in a display name.
    pub marker: &'a str,
    /// Fill for texts containing `marker`.
    pub tracked: &'a str,
    /// Fill for every other team text.
    pub opponent: &'a str,
}

impl<'a> TeamColors<'a> {
    /// Colors of the configured tracked team.
    pub fn from_team(team: &'a TrackedTeam) -> Self {
        Self {
            marker: &team.marker,
            tracked: &team.color,
            opponent: &team.opponent_color,
        }
    }

    /// Fill color for a team text.
    pub fn for_text(&self, text: &str) -> &'a str {
        if text.contains(self.marker) {
            self.tracked
        } else {
            self.opponent
        }
    }
}

/// Rewrite labelled text slots of `root` in place.
///
/// Walks pre-order. A node whose label is a key gets the value written into its first
/// `tspan` child, the key is consumed and the node's subtree is not visited further.
/// The walk stops as soon as `replacements` is empty, so deeper duplicates of an already
/// consumed label are left alone. Keys with no matching label stay in `replacements`.
pub fn substitute(root: &mut Element, replacements: &mut ReplacementSet, colors: &TeamColors<'_>) {
    if replacements.is_empty() {
        return;
    }
    visit(root, replacements, colors);
}

fn visit(node: &mut Element, replacements: &mut ReplacementSet, colors: &TeamColors<'_>) {
    let matched = node
        .label()
        .filter(|label| replacements.contains(label))
        .map(str::to_string);

    if let Some(label) = matched {
        fill_slot(node, &label, replacements, colors);
        return;
    }

    for child in node.child_elements_mut() {
        visit(child, replacements, colors);
        if replacements.is_empty() {
            return;
        }
    }
}

fn fill_slot(
    node: &mut Element,
    label: &str,
    replacements: &mut ReplacementSet,
    colors: &TeamColors<'_>,
) {
    let Some(span) = node
        .child_elements_mut()
        .find(|c| c.role() == NodeRole::TextSpan)
    else {
        tracing::debug!(label, "labelled slot has no tspan, leaving key unconsumed");
        return;
    };
    let Some(value) = replacements.take(label) else {
        return;
    };

    if label.contains("team") {
        let fill = colors.for_text(&value);
        if let Some(style) = span.attr(None, "style") {
            let style = recolor_fill(style, fill);
            span.set_attr(None, "style", style);
        }
    }
    span.set_text(value);
}

/// Replace the value of every `fill:` declaration, leaving other declarations untouched.
pub fn recolor_fill(style: &str, color: &str) -> String {
    style
        .split(';')
        .map(|decl| {
            if decl.starts_with("fill:") {
                format!("fill:{color}")
            } else {
                decl.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
#[path = "../../tests/unit/document/substitute.rs"]
mod tests;
