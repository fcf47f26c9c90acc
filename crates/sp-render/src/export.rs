//! Static HTML export.
//!
//! Produces a self-contained, read-only page: one absolutely positioned box
//! per node, in paint order, carrying its size, fill, rotation, z-index, and
//! (for text) its content. The output is not meant to be imported back.

use sp_core::{Document, Node, Surface};
use std::fmt::Write;

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline CSS for one node at stacking position `z_index`.
pub fn node_style(node: &Node, z_index: u32) -> String {
    let g = &node.geometry;
    format!(
        "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;\
         background:{};transform:rotate({}deg);z-index:{};",
        g.x,
        g.y,
        g.width,
        g.height,
        node.style.fill.to_hex(),
        g.rotation,
        z_index
    )
}

fn push_node(out: &mut String, node: &Node, z_index: u32) {
    let class = if node.is_text() { "node text-box" } else { "node rect" };
    let text = if node.is_text() {
        escape_html(&node.content)
    } else {
        String::new()
    };
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "    <div id=\"{}\" class=\"{class}\" style=\"{}\">{text}</div>",
        node.id,
        node_style(node, z_index)
    );
}

/// Render the whole document as an HTML page sized to `surface`.
pub fn render_html(doc: &Document, surface: &Surface) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Scenepad export</title>\n<style>\n");
    out.push_str("  .canvas { position: relative; overflow: hidden; background: #F5F5F5; }\n");
    out.push_str("  .node { box-sizing: border-box; transform-origin: center center; }\n");
    out.push_str("  .text-box { display: flex; align-items: center; justify-content: center; font-family: sans-serif; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
    let _ = writeln!(
        out,
        "  <div class=\"canvas\" style=\"width:{}px;height:{}px;\">",
        surface.width, surface.height
    );

    let order = doc.paint_order();
    for (node, (_, z)) in doc.iter().zip(order) {
        push_node(&mut out, node, z);
    }

    out.push_str("  </div>\n</body>\n</html>\n");
    log::info!("exported {} nodes as html", doc.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::NodeKind;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn node_style_has_all_fields() {
        let mut doc = Document::new();
        let id = doc.create(NodeKind::Rectangle, 12.5, 30.0);
        let node = doc.get_mut(id).expect("node exists");
        node.geometry.rotation = -45.0;
        let style = node_style(node, 3);
        assert_eq!(
            style,
            "position:absolute;left:12.5px;top:30px;width:80px;height:80px;\
             background:#3B82F6;transform:rotate(-45deg);z-index:3;"
        );
    }

    #[test]
    fn html_lists_nodes_in_paint_order() {
        let mut doc = Document::new();
        let a = doc.create(NodeKind::Rectangle, 0.0, 0.0);
        let b = doc.create(NodeKind::Text, 10.0, 10.0);
        doc.get_mut(b).expect("text exists").content = "a < b".into();
        doc.move_up(a);

        let html = render_html(&doc, &Surface::new(640.0, 480.0));
        let pos_a = html.find("id=\"element-1\"").expect("a exported");
        let pos_b = html.find("id=\"element-2\"").expect("b exported");
        assert!(pos_b < pos_a, "bottom node must come first");
        assert!(html.contains("a &lt; b</div>"));
        assert!(html.contains("width:640px;height:480px;"));
        assert!(html.contains("z-index:2;\"></div>"));
    }
}
