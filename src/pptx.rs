// ABOUTME: PPTX generation module for the deck-slides application
// ABOUTME: Writes laid-out slides into an OOXML presentation archive

use crate::errors::{DeckError, Result};
use crate::layout::{PositionedElement, Rect, SlideLayout};
use crate::model::{ShapeKind, SlideElement};
use crate::runs::StyledRun;
use image::io::Reader as ImageReader;
use log::{info, warn};
use quick_xml::escape::escape;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::{write::FileOptions, ZipWriter};

/// Configuration for PPTX generation
pub struct PptxConfig {
    pub title: String,
    pub aspect_ratio: String, // "16:9" or "4:3"
    /// Directory against which relative picture hrefs are resolved.
    pub media_dir: PathBuf,
}

impl Default for PptxConfig {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            aspect_ratio: "16:9".to_string(),
            media_dir: PathBuf::from("."),
        }
    }
}

/// Slide dimensions in EMU for a named aspect ratio. Unsupported ratios warn
/// and fall back to 16:9.
pub fn slide_size(aspect_ratio: &str) -> (i64, i64) {
    match aspect_ratio {
        "16:9" => (9144000, 5143500),
        "4:3" => (9144000, 6858000),
        _ => {
            warn!(
                "Unsupported aspect ratio: {}. Using 16:9 instead.",
                aspect_ratio
            );
            (9144000, 5143500)
        }
    }
}

fn xml_escape(text: &str) -> String {
    escape(text).into_owned()
}

/// Per-slide relationship table: picture embeds, hyperlinks, notes.
struct SlideRels {
    entries: Vec<String>,
}

impl SlideRels {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(format!(
            r#"    <Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}" Target="{}"/>"#,
            id,
            rel_type,
            xml_escape(target)
        ));
        id
    }

    fn add_external(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(format!(
            r#"    <Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}" Target="{}" TargetMode="External"/>"#,
            id,
            rel_type,
            xml_escape(target)
        ));
        id
    }

    fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n{}\n</Relationships>",
            self.entries.join("\n")
        )
    }
}

/// Generate a PPTX presentation from laid-out slides
pub fn generate_pptx(layouts: &[SlideLayout], output_file: &Path, config: &PptxConfig) -> Result<()> {
    info!("Generating PPTX with {} slides", layouts.len());

    if layouts.is_empty() {
        return Err(DeckError::NoSlidesError(
            "document contains no depth-1 headings".to_string(),
        ));
    }

    // Ensure parent directory for output file exists
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(DeckError::FileReadError)?;
        }
    }

    let file = fs::File::create(output_file).map_err(DeckError::FileReadError)?;
    let mut zip = ZipWriter::new(file);

    let (cx, cy) = slide_size(&config.aspect_ratio);

    let notes_indices: Vec<usize> = layouts
        .iter()
        .enumerate()
        .filter(|(_, l)| l.notes.is_some())
        .map(|(i, _)| i)
        .collect();

    // Add [Content_Types].xml
    info!("Creating PPTX structure: [Content_Types].xml");
    zip.start_file("[Content_Types].xml", FileOptions::default())?;
    let slide_overrides = (0..layouts.len())
        .map(|i| {
            format!(
                r#"    <Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i + 1
            )
        })
        .collect::<Vec<String>>()
        .join("\n");
    let notes_overrides = notes_indices
        .iter()
        .enumerate()
        .map(|(n, _)| {
            format!(
                r#"    <Override PartName="/ppt/notesSlides/notesSlide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml"/>"#,
                n + 1
            )
        })
        .collect::<Vec<String>>()
        .join("\n");
    let content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="jpeg" ContentType="image/jpeg"/>
    <Default Extension="jpg" ContentType="image/jpeg"/>
    <Default Extension="png" ContentType="image/png"/>
    <Default Extension="gif" ContentType="image/gif"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
{slides}
{notes}
</Types>"#,
        slides = slide_overrides,
        notes = notes_overrides
    );
    zip.write_all(content_types.as_bytes())?;

    // Add _rels/.rels
    info!("Creating PPTX structure: _rels/.rels");
    zip.start_file("_rels/.rels", FileOptions::default())?;
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;
    zip.write_all(rels.as_bytes())?;

    // Add docProps/app.xml
    info!("Creating PPTX structure: docProps/app.xml");
    zip.start_file("docProps/app.xml", FileOptions::default())?;
    let app_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>deck-slides</Application>
    <Slides>{}</Slides>
</Properties>"#,
        layouts.len()
    );
    zip.write_all(app_xml.as_bytes())?;

    // Add docProps/core.xml
    info!("Creating PPTX structure: docProps/core.xml");
    zip.start_file("docProps/core.xml", FileOptions::default())?;
    let core_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{}</dc:title>
    <dc:creator>deck-slides</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
        xml_escape(&config.title),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    zip.write_all(core_xml.as_bytes())?;

    // Add ppt/_rels/presentation.xml.rels
    info!("Creating PPTX structure: ppt/_rels/presentation.xml.rels");
    zip.start_file("ppt/_rels/presentation.xml.rels", FileOptions::default())?;
    let mut pres_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for i in 0..layouts.len() {
        pres_rels.push_str(&format!(
            r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            i + 1,
            i + 1
        ));
        pres_rels.push('\n');
    }
    pres_rels.push_str("</Relationships>");
    zip.write_all(pres_rels.as_bytes())?;

    // Add ppt/presentation.xml
    info!("Creating PPTX structure: ppt/presentation.xml");
    zip.start_file("ppt/presentation.xml", FileOptions::default())?;
    let presentation_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:sldIdLst>
{slide_ids}
    </p:sldIdLst>
    <p:sldSz cx="{cx}" cy="{cy}" type="screen4x3"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
        slide_ids = (0..layouts.len())
            .map(|i| format!(r#"        <p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 1))
            .collect::<Vec<String>>()
            .join("\n"),
        cx = cx,
        cy = cy
    );
    zip.write_all(presentation_xml.as_bytes())?;

    // Process each slide
    let mut media_count = 0usize;
    let mut notes_count = 0usize;
    for (i, layout) in layouts.iter().enumerate() {
        let slide_num = i + 1;
        info!("Processing slide {}: {}", slide_num, layout.title);

        let mut rels = SlideRels::new();
        let mut media: Vec<(String, Vec<u8>)> = Vec::new();
        let mut shape_id = 2u32;

        let mut body = String::new();
        body.push_str(&title_sp(&layout.title, &layout.title_box, &mut shape_id));
        for placed in &layout.elements {
            if let Some(xml) = element_sp(
                placed,
                &mut shape_id,
                &mut rels,
                &mut media,
                &mut media_count,
                &config.media_dir,
            ) {
                body.push_str(&xml);
            }
        }

        if layout.notes.is_some() {
            notes_count += 1;
            rels.add("notesSlide", &format!("../notesSlides/notesSlide{}.xml", notes_count));
        }

        // Embedded pictures go under ppt/media/
        for (name, data) in &media {
            info!("Adding image to PPTX: ppt/media/{}", name);
            zip.start_file(format!("ppt/media/{}", name), FileOptions::default())?;
            zip.write_all(data)?;
        }

        info!(
            "Creating slide relationships: ppt/slides/_rels/slide{}.xml.rels",
            slide_num
        );
        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            FileOptions::default(),
        )?;
        zip.write_all(rels.to_xml().as_bytes())?;

        info!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);
        zip.start_file(
            format!("ppt/slides/slide{}.xml", slide_num),
            FileOptions::default(),
        )?;
        let slide_xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
{body}
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sld>"#,
            body = body
        );
        zip.write_all(slide_xml.as_bytes())?;

        if let Some(notes) = &layout.notes {
            write_notes_slide(&mut zip, notes_count, slide_num, notes)?;
        }
    }

    // Finalize the ZIP file
    info!("Finalizing PPTX file");
    zip.finish()?;

    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

fn write_notes_slide(
    zip: &mut ZipWriter<fs::File>,
    notes_num: usize,
    slide_num: usize,
    notes: &str,
) -> Result<()> {
    info!(
        "Creating notes slide: ppt/notesSlides/notesSlide{}.xml",
        notes_num
    );
    zip.start_file(
        format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", notes_num),
        FileOptions::default(),
    )?;
    let notes_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="../slides/slide{}.xml"/>
</Relationships>"#,
        slide_num
    );
    zip.write_all(notes_rels.as_bytes())?;

    zip.start_file(
        format!("ppt/notesSlides/notesSlide{}.xml", notes_num),
        FileOptions::default(),
    )?;
    let notes_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr/>
            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="2" name="Notes"/>
                    <p:cNvSpPr txBox="1"/>
                    <p:nvPr/>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="685800" y="4572000"/>
                        <a:ext cx="5486400" cy="3657600"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                </p:spPr>
                <p:txBody>
                    <a:bodyPr wrap="square"/>
                    <a:lstStyle/>
                    <a:p>
                        <a:r>
                            <a:rPr lang="en-US" dirty="0"/>
                            <a:t>{}</a:t>
                        </a:r>
                    </a:p>
                </p:txBody>
            </p:sp>
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:notes>"#,
        xml_escape(notes)
    );
    zip.write_all(notes_xml.as_bytes())?;
    Ok(())
}

fn title_sp(title: &str, title_box: &Rect, shape_id: &mut u32) -> String {
    let id = *shape_id;
    *shape_id += 1;
    format!(
        r#"            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="{id}" name="Title"/>
                    <p:cNvSpPr txBox="1"/>
                    <p:nvPr/>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{x}" y="{y}"/>
                        <a:ext cx="{w}" cy="{h}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                </p:spPr>
                <p:txBody>
                    <a:bodyPr wrap="square"/>
                    <a:lstStyle/>
                    <a:p>
                        <a:r>
                            <a:rPr lang="en-US" sz="3200" b="1" dirty="0"/>
                            <a:t>{title}</a:t>
                        </a:r>
                    </a:p>
                </p:txBody>
            </p:sp>
"#,
        id = id,
        x = title_box.x,
        y = title_box.y,
        w = title_box.width,
        h = title_box.height,
        title = xml_escape(title)
    )
}

/// Drawing XML for one placed element. Pictures that cannot be read or
/// decoded are skipped with a warning; the slide continues without them.
fn element_sp(
    placed: &PositionedElement,
    shape_id: &mut u32,
    rels: &mut SlideRels,
    media: &mut Vec<(String, Vec<u8>)>,
    media_count: &mut usize,
    media_dir: &Path,
) -> Option<String> {
    match &placed.element {
        SlideElement::TextBlock { runs } => Some(text_block_sp(runs, placed, shape_id, rels)),
        SlideElement::Image { href, alt } => {
            picture_sp(href, alt, placed, shape_id, rels, MediaOut { media, media_count }, media_dir)
        }
        SlideElement::Table { headers, rows } => {
            Some(table_frame(headers, rows, placed, shape_id))
        }
        SlideElement::Shape { kind, options } => Some(shape_sp(*kind, options, placed, shape_id)),
        SlideElement::ColumnBreak => None,
    }
}

fn text_block_sp(
    runs: &[StyledRun],
    placed: &PositionedElement,
    shape_id: &mut u32,
    rels: &mut SlideRels,
) -> String {
    let id = *shape_id;
    *shape_id += 1;

    // Runs flagged as line-breaking close a paragraph.
    let mut paragraphs: Vec<Vec<&StyledRun>> = vec![Vec::new()];
    for run in runs {
        if let Some(last) = paragraphs.last_mut() {
            last.push(run);
        }
        if run.style.breaks_line {
            paragraphs.push(Vec::new());
        }
    }

    let mut body = String::new();
    for paragraph in paragraphs.iter().filter(|p| !p.is_empty()) {
        body.push_str("                    <a:p>\n");
        if paragraph.first().map(|r| r.style.bullet).unwrap_or(false) {
            body.push_str(
                "                        <a:pPr marL=\"285750\" indent=\"-285750\"><a:buChar char=\"\u{2022}\"/></a:pPr>\n",
            );
        }
        for run in paragraph {
            body.push_str(&run_xml(run, rels));
        }
        body.push_str("                    </a:p>\n");
    }

    format!(
        r#"            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="{id}" name="TextBlock"/>
                    <p:cNvSpPr txBox="1"/>
                    <p:nvPr/>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{x}" y="{y}"/>
                        <a:ext cx="{w}" cy="{h}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                </p:spPr>
                <p:txBody>
                    <a:bodyPr wrap="square"/>
                    <a:lstStyle/>
{body}                </p:txBody>
            </p:sp>
"#,
        id = id,
        x = placed.x,
        y = placed.y,
        w = placed.width,
        h = placed.height,
        body = body
    )
}

fn run_xml(run: &StyledRun, rels: &mut SlideRels) -> String {
    let mut props = String::from("lang=\"en-US\"");
    if run.style.bold {
        props.push_str(" b=\"1\"");
    }
    if run.style.italic {
        props.push_str(" i=\"1\"");
    }

    let mut children = String::new();
    if run.style.monospace {
        children.push_str("<a:latin typeface=\"Courier New\"/>");
    }
    if let Some(link) = &run.style.hyperlink {
        let rel_id = rels.add_external("hyperlink", &link.url);
        children.push_str(&format!(
            "<a:hlinkClick xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" r:id=\"{}\" tooltip=\"{}\"/>",
            rel_id,
            xml_escape(&link.tooltip)
        ));
    }

    format!(
        "                        <a:r><a:rPr {} dirty=\"0\">{}</a:rPr><a:t>{}</a:t></a:r>\n",
        props,
        children,
        xml_escape(run.text.trim_end_matches('\n'))
    )
}

/// Picture bytes staged for the current slide, plus the archive-wide counter
/// used to name media parts.
struct MediaOut<'a> {
    media: &'a mut Vec<(String, Vec<u8>)>,
    media_count: &'a mut usize,
}

fn picture_sp(
    href: &str,
    alt: &str,
    placed: &PositionedElement,
    shape_id: &mut u32,
    rels: &mut SlideRels,
    out: MediaOut,
    media_dir: &Path,
) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        warn!("Skipping remote image (not embedded): {}", href);
        return None;
    }

    let path = if Path::new(href).is_absolute() {
        PathBuf::from(href)
    } else {
        media_dir.join(href)
    };

    let image_data = match fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to read image file {:?}: {}", path, e);
            return None;
        }
    };

    // Verify image can be read and decoded (for validation)
    match ImageReader::open(&path) {
        Ok(reader) => {
            if let Err(e) = reader.decode() {
                warn!("Failed to decode image {:?}: {}", path, e);
                return None;
            }
        }
        Err(e) => {
            warn!("Failed to open image {:?}: {}", path, e);
            return None;
        }
    }

    *out.media_count += 1;
    let image_ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "png".to_string());
    let image_name = format!("image{}.{}", out.media_count, image_ext);
    let rel_id = rels.add("image", &format!("../media/{}", image_name));
    out.media.push((image_name, image_data));

    let id = *shape_id;
    *shape_id += 1;
    Some(format!(
        r#"            <p:pic>
                <p:nvPicPr>
                    <p:cNvPr id="{id}" name="{alt}"/>
                    <p:cNvPicPr>
                        <a:picLocks noChangeAspect="1"/>
                    </p:cNvPicPr>
                    <p:nvPr/>
                </p:nvPicPr>
                <p:blipFill>
                    <a:blip r:embed="{rel_id}"/>
                    <a:stretch>
                        <a:fillRect/>
                    </a:stretch>
                </p:blipFill>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{x}" y="{y}"/>
                        <a:ext cx="{w}" cy="{h}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect">
                        <a:avLst/>
                    </a:prstGeom>
                </p:spPr>
            </p:pic>
"#,
        id = id,
        alt = xml_escape(alt),
        rel_id = rel_id,
        x = placed.x,
        y = placed.y,
        w = placed.width,
        h = placed.height
    ))
}

fn table_frame(
    headers: &[String],
    rows: &[Vec<String>],
    placed: &PositionedElement,
    shape_id: &mut u32,
) -> String {
    let id = *shape_id;
    *shape_id += 1;

    let columns = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0))
        .max(1);
    let column_width = placed.width / columns as i64;

    let grid = (0..columns)
        .map(|_| format!("                            <a:gridCol w=\"{}\"/>", column_width))
        .collect::<Vec<String>>()
        .join("\n");

    let mut body = String::new();
    body.push_str(&table_row(headers, columns, true));
    for row in rows {
        body.push_str(&table_row(row, columns, false));
    }

    format!(
        r#"            <p:graphicFrame>
                <p:nvGraphicFramePr>
                    <p:cNvPr id="{id}" name="Table"/>
                    <p:cNvGraphicFramePr/>
                    <p:nvPr/>
                </p:nvGraphicFramePr>
                <p:xfrm>
                    <a:off x="{x}" y="{y}"/>
                    <a:ext cx="{w}" cy="{h}"/>
                </p:xfrm>
                <a:graphic>
                    <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">
                        <a:tbl>
                            <a:tblPr firstRow="1" bandRow="1"/>
                            <a:tblGrid>
{grid}
                            </a:tblGrid>
{body}                        </a:tbl>
                    </a:graphicData>
                </a:graphic>
            </p:graphicFrame>
"#,
        id = id,
        x = placed.x,
        y = placed.y,
        w = placed.width,
        h = placed.height,
        grid = grid,
        body = body
    )
}

fn table_row(cells: &[String], columns: usize, header: bool) -> String {
    let bold = if header { " b=\"1\"" } else { "" };
    let mut row = String::from("                            <a:tr h=\"342900\">\n");
    for i in 0..columns {
        let text = cells.get(i).map(String::as_str).unwrap_or("");
        row.push_str(&format!(
            "                                <a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang=\"en-US\"{}/><a:t>{}</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>\n",
            bold,
            xml_escape(text)
        ));
    }
    row.push_str("                            </a:tr>\n");
    row
}

fn preset_geometry(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Rectangle => "rect",
        ShapeKind::Oval | ShapeKind::Ellipse => "ellipse",
        ShapeKind::Line => "line",
        ShapeKind::Triangle => "triangle",
    }
}

/// Solid fill color from the options bag: `{"fill": {"color": "RRGGBB"}}` or
/// a flat `"fill-color"` key.
fn fill_color(options: &Map<String, Value>) -> Option<String> {
    options
        .get("fill")
        .and_then(|fill| fill.get("color"))
        .or_else(|| options.get("fill-color"))
        .and_then(Value::as_str)
        .map(|color| color.trim_start_matches('#').to_uppercase())
}

fn shape_sp(
    kind: ShapeKind,
    options: &Map<String, Value>,
    placed: &PositionedElement,
    shape_id: &mut u32,
) -> String {
    let id = *shape_id;
    *shape_id += 1;

    let fill = match fill_color(options) {
        Some(color) => format!(
            "\n                    <a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
            xml_escape(&color)
        ),
        None => String::new(),
    };

    format!(
        r#"            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="{id}" name="Shape"/>
                    <p:cNvSpPr/>
                    <p:nvPr/>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{x}" y="{y}"/>
                        <a:ext cx="{w}" cy="{h}"/>
                    </a:xfrm>
                    <a:prstGeom prst="{prst}">
                        <a:avLst/>
                    </a:prstGeom>{fill}
                </p:spPr>
                <p:txBody>
                    <a:bodyPr/>
                    <a:lstStyle/>
                    <a:p/>
                </p:txBody>
            </p:sp>
"#,
        id = id,
        x = placed.x,
        y = placed.y,
        w = placed.width,
        h = placed.height,
        prst = preset_geometry(kind),
        fill = fill
    )
}
