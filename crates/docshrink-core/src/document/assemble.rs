//! Output document assembly.
//!
//! Builds a brand-new PDF from a list of page images: one DCTDecode image
//! XObject per page, with the page box sized exactly to the raster and a
//! content stream that draws the image across the whole page from the
//! origin. The source document is never touched; assembly only ever sees
//! encoded page rasters.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

/// Name under which each page's image XObject is registered in its own
/// resource dictionary.
const IMAGE_NAME: &str = "Im0";

/// Errors during document assembly.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// No pages were supplied.
    #[error("Cannot assemble a document with no pages")]
    NoPages,

    /// A page image has zero dimensions.
    #[error("Page {index} has invalid dimensions {width}x{height}")]
    InvalidPage { index: usize, width: u32, height: u32 },

    /// Serializing the document failed.
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// One encoded page, ready for embedding.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// JPEG-encoded page raster.
    pub jpeg: Vec<u8>,
    /// Raster width in pixels; also the page box width in points.
    pub width: u32,
    /// Raster height in pixels; also the page box height in points.
    pub height: u32,
}

/// Assemble a new document from encoded page images.
///
/// Pages appear in input order, one output page per input page. Returns the
/// serialized document bytes.
pub fn assemble_document(pages: &[PageImage]) -> Result<Vec<u8>, AssembleError> {
    if pages.is_empty() {
        return Err(AssembleError::NoPages);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        if page.width == 0 || page.height == 0 {
            return Err(AssembleError::InvalidPage {
                index,
                width: page.width,
                height: page.height,
            });
        }

        let image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => page.width as i64,
            "Height" => page.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        };
        // JPEG data is already compressed; keep lopdf from deflating it again
        let image_id =
            doc.add_object(Stream::new(image_dict, page.jpeg.clone()).with_compression(false));

        // Draw the image across the full page box from the origin
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        (page.width as i64).into(),
                        0.into(),
                        0.into(),
                        (page.height as i64).into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![IMAGE_NAME.into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| AssembleError::Serialize(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (page.width as i64).into(),
                (page.height as i64).into(),
            ],
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    IMAGE_NAME => image_id,
                },
            },
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = pages.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => count,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AssembleError::Serialize(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_raster;
    use crate::raster::RasterSurface;
    use crate::settings::OutputFormat;

    fn page_image(width: u32, height: u32, shade: u8) -> PageImage {
        let pixels = vec![shade; (width * height * 3) as usize];
        let surface = RasterSurface::new(width, height, pixels);
        let jpeg = encode_raster(&surface, OutputFormat::Jpeg, 0.8).unwrap();
        PageImage {
            jpeg,
            width,
            height,
        }
    }

    #[test]
    fn test_assemble_single_page() {
        let bytes = assemble_document(&[page_image(100, 150, 128)]).unwrap();

        assert_eq!(&bytes[0..5], b"%PDF-");
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_assemble_preserves_page_count_and_sizes() {
        let pages = vec![
            page_image(100, 150, 0),
            page_image(300, 100, 128),
            page_image(50, 50, 255),
        ];
        let bytes = assemble_document(&pages).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let mut page_ids: Vec<_> = doc.get_pages().into_iter().collect();
        assert_eq!(page_ids.len(), 3);
        page_ids.sort_by_key(|(number, _)| *number);

        for ((_, page_id), page) in page_ids.iter().zip(&pages) {
            let dict = doc.get_dictionary(*page_id).unwrap();
            let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
            assert_eq!(media_box[2].as_i64().unwrap(), page.width as i64);
            assert_eq!(media_box[3].as_i64().unwrap(), page.height as i64);
        }
    }

    #[test]
    fn test_embedded_stream_is_dctdecode_jpeg() {
        let page = page_image(64, 64, 200);
        let bytes = assemble_document(&[page.clone()]).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let mut found = false;
        for object in doc.objects.values() {
            if let Object::Stream(stream) = object {
                let subtype = stream.dict.get(b"Subtype").and_then(|o| o.as_name());
                if subtype.map(|n| n == b"Image").unwrap_or(false) {
                    assert_eq!(
                        stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
                        b"DCTDecode"
                    );
                    // The embedded bytes are the JPEG, byte for byte
                    assert_eq!(stream.content, page.jpeg);
                    found = true;
                }
            }
        }
        assert!(found, "no image XObject in assembled document");
    }

    #[test]
    fn test_no_pages_rejected() {
        assert!(matches!(assemble_document(&[]), Err(AssembleError::NoPages)));
    }

    #[test]
    fn test_zero_sized_page_rejected() {
        let page = PageImage {
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 0,
            height: 100,
        };
        assert!(matches!(
            assemble_document(&[page]),
            Err(AssembleError::InvalidPage { index: 0, .. })
        ));
    }

    #[test]
    fn test_larger_jpeg_grows_document() {
        let small = assemble_document(&[page_image(50, 50, 128)]).unwrap();
        let large = assemble_document(&[
            page_image(50, 50, 128),
            page_image(400, 400, 60),
        ])
        .unwrap();
        assert!(large.len() > small.len());
    }
}
