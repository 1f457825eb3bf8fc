/// Text frame access for shapes.
use crate::ooxml::error::Result;
use crate::ooxml::pptx::shapes::xml::XmlElement;
use crate::ooxml::units::Length;

/// Prefix used for new DrawingML elements when none can be borrowed from the
/// surrounding markup.
const DEFAULT_DRAWING_PREFIX: &str = "a:";

/// Character PowerPoint uses for a soft line break (`<a:br/>`) in plain text.
pub const VERTICAL_TAB: char = '\u{b}';

/// Autofit modes that are mutually exclusive inside `<a:bodyPr>`.
const AUTOFIT_ELEMENTS: [&str; 3] = ["noAutofit", "normAutofit", "spAutoFit"];

/// Run-level content replaced when a paragraph is rewritten.
const RUN_ELEMENTS: [&str; 3] = ["r", "fld", "br"];

/// A read-only view of a shape's `<p:txBody>`.
///
/// # Examples
///
/// ```rust,ignore
/// let frame = shape.text_frame().unwrap();
/// println!("Text: {}", frame.text()?);
///
/// for para in frame.paragraphs() {
///     println!("Paragraph: {}", para.text()?);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextFrame<'a> {
    body: &'a XmlElement,
}

impl<'a> TextFrame<'a> {
    pub(crate) fn new(body: &'a XmlElement) -> Self {
        Self { body }
    }

    /// Plain text of the frame, paragraphs separated by `\n`.
    pub fn text(&self) -> Result<String> {
        let mut text = String::new();
        for (i, para) in self.paragraphs().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&para.text()?);
        }
        Ok(text)
    }

    /// Paragraphs (`<a:p>`) in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'a>> + 'a {
        self.body
            .elements()
            .filter(|e| e.local_name() == "p")
            .map(|element| Paragraph { element })
    }
}

/// A paragraph within a text frame.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl Paragraph<'_> {
    /// Text of the paragraph's runs and fields; line breaks become vertical tabs.
    pub fn text(&self) -> Result<String> {
        let mut text = String::new();
        for child in self.element.elements() {
            match child.local_name() {
                "r" | "fld" => {
                    if let Some(t) = child.child("t") {
                        text.push_str(&t.text()?);
                    }
                },
                "br" => text.push(VERTICAL_TAB),
                _ => {},
            }
        }
        Ok(text)
    }

    /// Paragraph alignment from `<a:pPr algn>`.
    pub fn alignment(&self) -> Option<&str> {
        self.element.child("pPr")?.attr("algn")
    }
}

/// Body properties applied to a rewritten text frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLayout {
    /// `wrap="square"` when set
    pub word_wrap: bool,
    /// Adds `<a:normAutofit/>` in place of any other autofit mode
    pub shrink_text_on_overflow: bool,
    /// Left, top, right and bottom inset
    pub inset: Length,
}

/// Mutable access to a shape's `<p:txBody>`.
pub struct TextFrameMut<'a> {
    body: &'a mut XmlElement,
}

impl<'a> TextFrameMut<'a> {
    pub(crate) fn new(body: &'a mut XmlElement) -> Self {
        Self { body }
    }

    /// Apply wrap, autofit and insets to `<a:bodyPr>`, creating it if needed.
    pub fn set_body_layout(&mut self, layout: &BodyLayout) {
        if self.body.child("bodyPr").is_none() {
            let name = format!("{}bodyPr", self.drawing_prefix());
            self.body.insert_child(0, XmlElement::new(name));
        }
        let Some(body_pr) = self.body.child_mut("bodyPr") else {
            return;
        };

        if layout.word_wrap {
            body_pr.set_attr("wrap", "square");
        }
        let inset = layout.inset.as_emu().to_string();
        for key in ["lIns", "tIns", "rIns", "bIns"] {
            body_pr.set_attr(key, &inset);
        }

        if layout.shrink_text_on_overflow {
            body_pr.remove_children(&AUTOFIT_ELEMENTS);
            // Schema order puts the autofit choice right after prstTxWarp
            let index = body_pr.child_position("prstTxWarp").map_or(0, |i| i + 1);
            let name = format!("{}normAutofit", body_pr.prefix());
            body_pr.insert_child(index, XmlElement::new(name));
        }
    }

    /// Replace the runs of the first paragraph with one run per line.
    ///
    /// Lines are separated by `<a:br/>`. Every new run and break carries a copy
    /// of the paragraph's first run properties with `sz` set to `size`. Other
    /// paragraphs and the paragraph's `<a:endParaRPr>` are left alone.
    pub fn set_first_paragraph(&mut self, lines: &[&str], size: Length, alignment: &str) {
        if self.body.child("p").is_none() {
            let name = format!("{}p", self.drawing_prefix());
            self.body.push_child(XmlElement::new(name));
        }
        let Some(para) = self.body.child_mut("p") else {
            return;
        };
        let prefix = para.prefix().to_string();

        match para.child_mut("pPr") {
            Some(p_pr) => p_pr.set_attr("algn", alignment),
            None => para.insert_child(
                0,
                XmlElement::new(format!("{prefix}pPr")).with_attr("algn", alignment),
            ),
        }

        let mut r_pr = para
            .child("r")
            .and_then(|run| run.child("rPr"))
            .cloned()
            .unwrap_or_else(|| XmlElement::new(format!("{prefix}rPr")));
        r_pr.set_attr("sz", &size.centipoints().to_string());

        para.remove_children(&RUN_ELEMENTS);
        let mut index = para
            .child_position("endParaRPr")
            .unwrap_or(para.children().len());

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                let mut br = XmlElement::new(format!("{prefix}br"));
                br.push_child(r_pr.clone());
                para.insert_child(index, br);
                index += 1;
            }
            let mut t = XmlElement::new(format!("{prefix}t"));
            t.set_text(line);
            let mut run = XmlElement::new(format!("{prefix}r"));
            run.push_child(r_pr.clone());
            run.push_child(t);
            para.insert_child(index, run);
            index += 1;
        }
    }

    fn drawing_prefix(&self) -> String {
        self.body
            .elements()
            .next()
            .map_or(DEFAULT_DRAWING_PREFIX, XmlElement::prefix)
            .to_string()
    }
}
