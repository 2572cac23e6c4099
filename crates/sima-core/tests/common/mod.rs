#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// Acquisition metadata written into a synthetic OME document.
#[derive(Clone, Debug)]
pub struct OmeFixture {
    pub plate: Option<String>,
    pub date: String,
    pub well: String,
    pub vertical_total: Option<String>,
    pub horizontal_total: Option<String>,
    /// Use `verticalTotal`/`horizontalTotal` element names.
    pub lowercase_totals: bool,
    pub shutter_ms: String,
    pub objective: String,
    pub numerical_aperture: Option<String>,
    pub color: Option<String>,
    pub emission: Option<String>,
    pub excitation: Option<String>,
    pub size_x: Option<u32>,
    pub size_y: Option<u32>,
    /// Written as `PixelWidth`/`PixelHeight` elements.
    pub pixel_width: Option<u32>,
    pub pixel_height: Option<u32>,
    pub size_c: Option<u32>,
    pub size_t: Option<u32>,
    /// Vendor element names left out of the document.
    pub omit: Vec<&'static str>,
    /// Write `SizeX=""` instead of the `size_x` value.
    pub blank_size_x: bool,
}

impl Default for OmeFixture {
    fn default() -> Self {
        Self {
            plate: Some("Plate 1".into()),
            date: "09/15/23".into(),
            well: "B3".into(),
            vertical_total: Some("2".into()),
            horizontal_total: Some("3".into()),
            lowercase_totals: false,
            shutter_ms: "120".into(),
            objective: "20".into(),
            numerical_aperture: Some("0.45".into()),
            color: Some("DAPI".into()),
            emission: Some("461".into()),
            excitation: Some("377".into()),
            size_x: Some(8),
            size_y: Some(6),
            pixel_width: None,
            pixel_height: None,
            size_c: Some(2),
            size_t: Some(3),
            omit: Vec::new(),
            blank_size_x: false,
        }
    }
}

fn attribute(out: &mut String, name: &str, value: Option<u32>) {
    if let Some(v) = value {
        out.push_str(&format!(" {name}=\"{v}\""));
    }
}

impl OmeFixture {
    fn element(&self, out: &mut String, name: &str, value: Option<&str>) {
        if self.omit.iter().any(|o| *o == name) {
            return;
        }
        if let Some(v) = value {
            out.push_str(&format!("<{name}>{v}</{name}>"));
        }
    }

    /// Vendor acquisition block, without the OME wrapper.
    pub fn vendor_xml(&self) -> String {
        let (vertical, horizontal) = if self.lowercase_totals {
            ("verticalTotal", "horizontalTotal")
        } else {
            ("VerticalTotal", "HorizontalTotal")
        };

        let mut out = String::from("<BTIImageMetaData><ImageAcquisition>");
        self.element(&mut out, "Plate", self.plate.as_deref());
        self.element(&mut out, "Date", Some(&self.date));
        self.element(&mut out, "Well", Some(&self.well));
        self.element(&mut out, vertical, self.vertical_total.as_deref());
        self.element(&mut out, horizontal, self.horizontal_total.as_deref());
        self.element(&mut out, "ShutterSpeedMS", Some(&self.shutter_ms));
        self.element(&mut out, "ObjectiveSize", Some(&self.objective));
        self.element(&mut out, "NumericalAperture", self.numerical_aperture.as_deref());
        self.element(
            &mut out,
            "PixelWidth",
            self.pixel_width.map(|v| v.to_string()).as_deref(),
        );
        self.element(
            &mut out,
            "PixelHeight",
            self.pixel_height.map(|v| v.to_string()).as_deref(),
        );
        out.push_str("<Channel>");
        self.element(&mut out, "Color", self.color.as_deref());
        self.element(&mut out, "EmissionWavelength", self.emission.as_deref());
        self.element(&mut out, "ExcitationWavelength", self.excitation.as_deref());
        out.push_str("</Channel></ImageAcquisition></BTIImageMetaData>");
        out
    }

    /// Complete OME-XML document.
    pub fn ome_xml(&self) -> String {
        let mut pixels = String::from("<Pixels DimensionOrder=\"XYCZT\" Type=\"uint16\"");
        if self.blank_size_x {
            pixels.push_str(" SizeX=\"\"");
        } else {
            attribute(&mut pixels, "SizeX", self.size_x);
        }
        attribute(&mut pixels, "SizeY", self.size_y);
        attribute(&mut pixels, "SizeC", self.size_c);
        attribute(&mut pixels, "SizeT", self.size_t);
        pixels.push_str(" SizeZ=\"1\"/>");

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <OME xmlns=\"http://www.openmicroscopy.org/Schemas/OME/2016-06\">\
             <Image ID=\"Image:0\">{pixels}</Image>\
             <StructuredAnnotations><XMLAnnotation ID=\"Annotation:0\"><Value>{}</Value>\
             </XMLAnnotation></StructuredAnnotations></OME>",
            self.vendor_xml()
        )
    }
}

/// Encode an ImageJ metadata blob carrying only an `info` entry, big-endian.
///
/// Returns the blob and its byte counts, as stored in tags 50839 and 50838.
pub fn imagej_info_blob(info: &str) -> (Vec<u8>, Vec<u32>) {
    let mut data = Vec::new();
    data.extend_from_slice(b"IJIJ");
    data.extend_from_slice(&0x696e_666f_u32.to_be_bytes());
    data.extend_from_slice(&1u32.to_be_bytes());
    let header_len = data.len() as u32;

    let text: Vec<u8> = info.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
    let text_len = text.len() as u32;
    data.extend_from_slice(&text);

    (data, vec![header_len, text_len])
}

/// Pixel value of `pixel` in page `page` of a synthetic stack.
pub fn pixel_value(page: usize, pixel: usize) -> u16 {
    (page * 1000 + pixel) as u16
}

/// Text tags for the first page of a synthetic stack.
#[derive(Clone, Debug, Default)]
pub struct PageTags {
    pub description: Option<String>,
    pub imagej_info: Option<String>,
}

impl PageTags {
    pub fn ome(fixture: &OmeFixture) -> Self {
        Self {
            description: Some(fixture.ome_xml()),
            imagej_info: None,
        }
    }
}

/// Write a 16-bit grayscale multi-page TIFF. Page `p` holds
/// [`pixel_value`]`(p, i)` at pixel `i`.
pub fn write_stack(path: &Path, width: u32, height: u32, pages: usize, tags: &PageTags) {
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    let pixel_count = (width * height) as usize;

    for page in 0..pages {
        let data: Vec<u16> = (0..pixel_count).map(|i| pixel_value(page, i)).collect();
        let mut image = encoder
            .new_image::<colortype::Gray16>(width, height)
            .unwrap();
        if page == 0 {
            if let Some(ref description) = tags.description {
                image
                    .encoder()
                    .write_tag(Tag::ImageDescription, description.as_str())
                    .unwrap();
            }
            if let Some(ref info) = tags.imagej_info {
                let (blob, counts) = imagej_info_blob(info);
                image
                    .encoder()
                    .write_tag(Tag::Unknown(50838), counts.as_slice())
                    .unwrap();
                image
                    .encoder()
                    .write_tag(Tag::Unknown(50839), blob.as_slice())
                    .unwrap();
            }
        }
        image.write_data(&data).unwrap();
    }
}

/// Write an OME stack with `fixture` metadata and `pages` pages.
pub fn write_ome_stack(path: &Path, fixture: &OmeFixture, pages: usize) {
    let width = fixture.size_x.or(fixture.pixel_width).unwrap_or(8);
    let height = fixture.size_y.or(fixture.pixel_height).unwrap_or(6);
    write_stack(path, width, height, pages, &PageTags::ome(fixture));
}

/// Sorted file names in a directory.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
