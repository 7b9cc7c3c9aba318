//! Accordion markup serializer for a render tree.

use crate::render::RenderOptions;
use crate::render::tree::{NodeKind, RenderNode, RenderTree};
use crate::search::PresentationMode;

const COLLAPSED_STYLE: &str = "display: none";
const EXPANDED_STYLE: &str = "display: block";

/// Serialize `tree` as nested `<li>`/`<ul>` accordion items.
///
/// Text is emitted as-is; catalog descriptions and links already carry
/// whatever escaping the generator applied.
pub fn to_html(tree: &RenderTree, options: &RenderOptions) -> String {
    let state = ItemState::for_mode(tree.mode, options);
    let mut out = String::new();
    for node in &tree.nodes {
        push_node(&mut out, node, &state, options);
    }
    out
}

struct ItemState<'a> {
    li_class: &'a str,
    style: &'a str,
}

impl<'a> ItemState<'a> {
    fn for_mode(mode: PresentationMode, options: &'a RenderOptions) -> Self {
        match mode {
            PresentationMode::Collapsed => Self {
                li_class: "",
                style: COLLAPSED_STYLE,
            },
            PresentationMode::Expanded => Self {
                li_class: &options.open_class,
                style: EXPANDED_STYLE,
            },
        }
    }
}

fn push_node(out: &mut String, node: &RenderNode, state: &ItemState<'_>, options: &RenderOptions) {
    match node.kind {
        NodeKind::Group => {
            push_toggle(out, node, state, options);
            out.push_str(&format!("<ul class=\"{}\">", options.group_list_class));
            for child in &node.children {
                push_node(out, child, state, options);
            }
            out.push_str("</ul></li>");
        }
        NodeKind::Section => {
            push_toggle(out, node, state, options);
            out.push_str(&format!(
                "<ul class=\"{}\" style=\"{}\">",
                options.section_list_class, state.style
            ));
            for child in &node.children {
                push_node(out, child, state, options);
            }
            out.push_str("</ul></li>");
        }
        NodeKind::Entry => {
            let span = if node.deprecated {
                format!("<span class=\"{}\">", options.deprecated_class)
            } else {
                "<span>".to_string()
            };
            out.push_str(&format!(
                "<li><a href=\"#{}\">{}.&nbsp;{}{}</span></a> </li>",
                node.anchor, node.number, span, node.label
            ));
        }
    }
}

fn push_toggle(out: &mut String, node: &RenderNode, state: &ItemState<'_>, options: &RenderOptions) {
    out.push_str(&format!(
        "<li class=\"{}\"><a class=\"{}\" href=\"#{}\">{}.&nbsp;{}</a>",
        state.li_class, options.toggle_class, node.anchor, node.number, node.label
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: &str, label: &str, deprecated: bool) -> RenderNode {
        RenderNode {
            kind: NodeKind::Entry,
            number: number.into(),
            label: label.into(),
            anchor: format!("_{}_{}", number.replace('.', "_"), label),
            deprecated,
            children: Vec::new(),
        }
    }

    fn section_tree(mode: PresentationMode) -> RenderTree {
        RenderTree {
            mode,
            nodes: vec![RenderNode {
                kind: NodeKind::Section,
                number: "1.1".into(),
                label: "Admin API".into(),
                anchor: "_1_1_admin_api".into(),
                deprecated: false,
                children: vec![entry("1.1.1", "update admin", false)],
            }],
        }
    }

    #[test]
    fn collapsed_section_markup() {
        let html = to_html(&section_tree(PresentationMode::Collapsed), &RenderOptions::default());
        assert_eq!(
            html,
            "<li class=\"\"><a class=\"dd\" href=\"#_1_1_admin_api\">1.1.&nbsp;Admin API</a>\
             <ul class=\"sectlevel2\" style=\"display: none\">\
             <li><a href=\"#_1_1_1_update admin\">1.1.1.&nbsp;<span>update admin</span></a> </li>\
             </ul></li>"
        );
    }

    #[test]
    fn expanded_items_are_open() {
        let html = to_html(&section_tree(PresentationMode::Expanded), &RenderOptions::default());
        assert!(html.starts_with("<li class=\"open\">"));
        assert!(html.contains("style=\"display: block\""));
    }

    #[test]
    fn deprecated_entry_uses_configured_class() {
        let mut tree = section_tree(PresentationMode::Collapsed);
        tree.nodes[0].children.push(entry("1.1.2", "freeze admin", true));
        let options = RenderOptions {
            deprecated_class: "struck".into(),
            ..Default::default()
        };
        let html = to_html(&tree, &options);
        assert!(html.contains("<span class=\"struck\">freeze admin</span>"));
        assert!(html.contains("<span>update admin</span>"));
    }
}
