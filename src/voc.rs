//! PASCAL VOC XML rendering and parsing.
//!
//! Output goes through a `quick_xml::Writer` so escaping and well-formedness
//! are guaranteed by construction; input goes through typed serde structs so
//! required keys are validated at parse time instead of at first access.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;

use crate::error::{ConvertError, Result};
use crate::types::{AnnotationRecord, LabeledObject, SOURCE_DATABASE, UNSPECIFIED};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Render an annotation record as PASCAL VOC XML text.
///
/// Box coordinates are emitted as plain decimal strings in absolute pixels.
/// Fields the converter does not compute (`depth`, `segmented`, and unset
/// per-object flags) carry the "Unspecified" sentinel.
pub fn render_voc_xml(record: &AnnotationRecord) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("annotation")))?;

    write_element(&mut writer, "folder", &record.folder)?;
    write_element(&mut writer, "filename", &record.filename)?;
    write_element(&mut writer, "path", &record.path)?;

    writer.write_event(Event::Start(BytesStart::new("source")))?;
    write_element(&mut writer, "database", SOURCE_DATABASE)?;
    writer.write_event(Event::End(BytesEnd::new("source")))?;

    writer.write_event(Event::Start(BytesStart::new("size")))?;
    write_element(&mut writer, "width", &record.width.to_string())?;
    write_element(&mut writer, "height", &record.height.to_string())?;
    write_element(&mut writer, "depth", UNSPECIFIED)?;
    writer.write_event(Event::End(BytesEnd::new("size")))?;

    write_element(&mut writer, "segmented", UNSPECIFIED)?;

    for object in &record.objects {
        write_object(&mut writer, object)?;
    }

    writer.write_event(Event::End(BytesEnd::new("annotation")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ConvertError::malformed("annotation xml", e.to_string()))
}

fn write_object(writer: &mut XmlWriter, object: &LabeledObject) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("object")))?;

    write_element(writer, "name", &object.label)?;
    write_element(writer, "pose", &object.pose)?;
    let truncated = match object.truncated {
        Some(value) => value.to_string(),
        None => UNSPECIFIED.to_string(),
    };
    write_element(writer, "truncated", &truncated)?;
    let difficult = match object.difficult {
        Some(value) => i64::from(value).to_string(),
        None => UNSPECIFIED.to_string(),
    };
    write_element(writer, "difficult", &difficult)?;
    write_element(writer, "occluded", UNSPECIFIED)?;

    // xmin/xmax/ymin/ymax order matches the historical output.
    writer.write_event(Event::Start(BytesStart::new("bndbox")))?;
    write_element(writer, "xmin", &format_coord(object.bndbox.xmin))?;
    write_element(writer, "xmax", &format_coord(object.bndbox.xmax))?;
    write_element(writer, "ymin", &format_coord(object.bndbox.ymin))?;
    write_element(writer, "ymax", &format_coord(object.bndbox.ymax))?;
    writer.write_event(Event::End(BytesEnd::new("bndbox")))?;

    writer.write_event(Event::End(BytesEnd::new("object")))?;
    Ok(())
}

fn write_element(writer: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn format_coord(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Typed view of one `<annotation>` document.
///
/// Leaf fields stay `String` because slots that look numeric may carry the
/// "Unspecified" sentinel; interpretation happens in the record builder.
#[derive(Debug, Clone, Deserialize)]
pub struct XmlAnnotation {
    pub folder: String,
    pub filename: String,
    pub path: String,
    pub source: XmlSource,
    pub size: XmlSize,
    pub segmented: String,
    #[serde(rename = "object", default)]
    pub objects: Vec<XmlObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlSource {
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlSize {
    pub width: String,
    pub height: String,
    pub depth: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlObject {
    pub name: String,
    pub pose: String,
    pub truncated: String,
    pub difficult: String,
    #[serde(default)]
    pub occluded: Option<String>,
    pub bndbox: XmlBndBox,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlBndBox {
    pub xmin: String,
    pub xmax: String,
    pub ymin: String,
    pub ymax: String,
}

/// Parse one PASCAL VOC XML document into its typed form.
pub fn parse_voc_annotation(xml: &str) -> Result<XmlAnnotation> {
    Ok(serde_xml_rs::from_str(xml)?)
}
