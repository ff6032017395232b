//! PDF document assembly for laid-out pages.
//!
//! Uses the two standard Type1 fonts (Helvetica, Helvetica-Bold) with
//! WinAnsiEncoding, so no font data is embedded. The document carries no
//! info dictionary or file ID and its streams are left uncompressed, so the
//! output is byte-for-byte reproducible.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};

use crate::error::ExportResult;
use crate::layout::{FontFace, PageLayout, PositionedLine, PAGE_HEIGHT, PAGE_WIDTH};

/// Serialize laid-out pages into a complete PDF file.
pub fn write_document(pages: &[PageLayout]) -> ExportResult<Vec<u8>> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Regular));
    let bold_id = doc.add_object(font_dictionary(FontFace::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Regular.resource() => regular_id,
            FontFace::Bold.resource() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content: Content<Vec<Operation>> = Content {
            operations: page.lines.iter().flat_map(text_operations).collect(),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                number(PAGE_WIDTH),
                number(PAGE_HEIGHT),
            ],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn font_dictionary(face: FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// `BT /F1 12 Tf x y Td (text) Tj ET` for one line
fn text_operations(line: &PositionedLine) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(line.font.resource().as_bytes().to_vec()),
                number(line.size),
            ],
        ),
        Operation::new("Td", vec![number(line.x), number(line.y)]),
        Operation::new(
            "Tj",
            vec![Object::String(winansi_bytes(&line.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Encode text for a WinAnsi font. Characters it cannot represent become `?`.
pub fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(ch: char) -> u8 {
    match ch {
        '\t' => b' ',
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

/// Whole coordinates are written as integers
fn number(value: f32) -> Object {
    if value.fract() == 0.0 {
        Object::Integer(value as i64)
    } else {
        value.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_transcript, LayoutOptions};
    use debate_chat::Message;

    /// Text-showing operations per page, in drawing order
    fn shown_text(bytes: &[u8]) -> Vec<Vec<(String, Vec<i64>)>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                let mut position = Vec::new();
                let mut shown = Vec::new();
                for op in content.operations {
                    match op.operator.as_str() {
                        "Td" => {
                            position = op.operands.iter().map(|o| o.as_i64().unwrap()).collect();
                        }
                        "Tj" => match &op.operands[0] {
                            Object::String(text, _) => {
                                shown.push((String::from_utf8_lossy(text).into_owned(), position.clone()))
                            }
                            other => panic!("unexpected Tj operand {:?}", other),
                        },
                        _ => {}
                    }
                }
                shown
            })
            .collect()
    }

    #[test]
    fn test_winansi_encoding() {
        assert_eq!(winansi_bytes("a (b) c\\d"), b"a (b) c\\d".to_vec());
        assert_eq!(winansi_bytes("caf\u{e9}"), b"caf\xe9".to_vec());
        assert_eq!(winansi_bytes("it’s"), b"it\x92s".to_vec());
        assert_eq!(winansi_bytes("🎤"), b"?".to_vec());
    }

    #[test]
    fn test_number_objects() {
        assert_eq!(number(752.0).as_i64().unwrap(), 752);
        assert!((number(12.5).as_float().unwrap() - 12.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_document_structure() {
        let pages = layout_transcript(&[Message::user("Hi")], &LayoutOptions::default()).unwrap();
        let bytes = write_document(&pages).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(!text.contains("/CreationDate"));
        assert!(!text.contains("/ID"));

        let shown = shown_text(&bytes);
        assert_eq!(shown.len(), 1);
        assert_eq!(
            shown[0],
            vec![
                ("Debate Transcript".to_string(), vec![50, 752]),
                ("User: Hi".to_string(), vec![50, 712]),
            ]
        );
    }

    #[test]
    fn test_special_characters_survive_round_trip() {
        let pages =
            layout_transcript(&[Message::assistant("(a) \\ b")], &LayoutOptions::default()).unwrap();
        let shown = shown_text(&write_document(&pages).unwrap());
        assert_eq!(shown[0][1].0, "Assistant: (a) \\ b");
    }

    #[test]
    fn test_startxref_points_at_cross_reference_table() {
        let pages = layout_transcript(&[Message::assistant("Reply")], &LayoutOptions::default()).unwrap();
        let bytes = write_document(&pages).unwrap();

        let marker = bytes.windows(9).rposition(|w| w == b"startxref").unwrap();
        let tail = String::from_utf8_lossy(&bytes[marker + 9..]).into_owned();
        let offset: usize = tail.split_whitespace().next().unwrap().parse().unwrap();
        assert!(bytes[offset..].starts_with(b"xref"));
    }
}
