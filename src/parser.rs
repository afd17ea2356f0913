use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::Gpx2CsvError;
use crate::waypoint::{Waypoint, WaypointField};

type Result<T> = std::result::Result<T, Gpx2CsvError>;
type Reader<'a> = NsReader<&'a [u8]>;

/// Namespace of GPX 1.1 documents. Elements outside of it are ignored.
pub const GPX_NAMESPACE: &[u8] = b"http://www.topografix.com/GPX/1/1";

/// Read and parse the GPX file at `path`.
pub fn read_gpx_file(path: &Path) -> Result<Vec<Waypoint>> {
    let xml = fs::read_to_string(path).map_err(|source| Gpx2CsvError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    parse_gpx(&xml)
}

/// Parse a GPX document into its waypoints, in document order.
///
/// Only `<wpt>` elements that are direct children of the root element and
/// live in the GPX 1.1 namespace are returned.
pub fn parse_gpx(xml: &str) -> Result<Vec<Waypoint>> {
    let mut reader = NsReader::from_str(xml);
    let mut waypoints = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let (in_gpx, event) = next_resolved(&mut reader)?;
        match event {
            Event::Start(e) => {
                if depth == 1 && in_gpx && e.local_name().as_ref() == b"wpt" {
                    waypoints.push(parse_waypoint(&e, &mut reader)?);
                    continue;
                }
                if depth == 0 {
                    enter_root(&mut seen_root)?;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    enter_root(&mut seen_root)?;
                } else if depth == 1 && in_gpx && e.local_name().as_ref() == b"wpt" {
                    let (lat, lon) = parse_lat_lon(&e)?;
                    waypoints.push(Waypoint::new(lat, lon));
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(Gpx2CsvError::Malformed("unmatched end tag"))?;
            }
            Event::Text(e) if depth == 0 => {
                if e.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(Gpx2CsvError::Malformed("text outside the root element"));
                }
            }
            Event::CData(_) | Event::GeneralRef(_) if depth == 0 => {
                return Err(Gpx2CsvError::Malformed("text outside the root element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Gpx2CsvError::Malformed("unexpected end of document"));
    }
    if !seen_root {
        return Err(Gpx2CsvError::Malformed("no root element"));
    }

    Ok(waypoints)
}

/// Read the next event and whether its element is bound to the GPX namespace.
fn next_resolved<'a>(reader: &mut Reader<'a>) -> Result<(bool, Event<'a>)> {
    let (ns, event) = reader.read_resolved_event()?;
    Ok((ns == ResolveResult::Bound(Namespace(GPX_NAMESPACE)), event))
}

fn enter_root(seen_root: &mut bool) -> Result<()> {
    if *seen_root {
        return Err(Gpx2CsvError::Malformed("more than one root element"));
    }
    *seen_root = true;
    Ok(())
}

/// Read the `lat` and `lon` attributes of a `<wpt>` start tag verbatim, apart
/// from the whitespace normalization every XML attribute value gets.
fn parse_lat_lon(e: &BytesStart<'_>) -> Result<(String, String)> {
    let mut lat: Option<String> = None;
    let mut lon: Option<String> = None;

    for attr_result in e.attributes() {
        let attr = attr_result?;
        match attr.key.as_ref() {
            b"lat" => lat = Some(attribute_value(&attr.value)?),
            b"lon" => lon = Some(attribute_value(&attr.value)?),
            _ => {}
        }
    }

    let lat = lat.ok_or(Gpx2CsvError::MissingAttribute {
        element: "wpt",
        attribute: "lat",
    })?;
    let lon = lon.ok_or(Gpx2CsvError::MissingAttribute {
        element: "wpt",
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Parse a `<wpt>` element and its direct children.
/// Called after receiving Event::Start for the waypoint; consumes its end tag.
fn parse_waypoint<'a>(start: &BytesStart<'a>, reader: &mut Reader<'a>) -> Result<Waypoint> {
    let (lat, lon) = parse_lat_lon(start)?;
    let mut waypoint = Waypoint::new(lat, lon);

    loop {
        let (in_gpx, event) = next_resolved(reader)?;
        match event {
            Event::Start(e) => {
                let field = in_gpx
                    .then(|| WaypointField::from_local_name(e.local_name().as_ref()))
                    .flatten();
                match field {
                    Some(field) => waypoint.set(field, read_text_owned(reader, &e)?),
                    None => {
                        // extensions, links and anything else we do not export
                        reader.read_to_end(e.name())?;
                    }
                }
            }
            Event::Empty(e) if in_gpx => {
                if let Some(field) = WaypointField::from_local_name(e.local_name().as_ref()) {
                    waypoint.set(field, String::new());
                }
            }
            // nested elements were consumed above, so this is </wpt>
            Event::End(_) => break,
            Event::Eof => return Err(Gpx2CsvError::Malformed("unexpected end of document")),
            _ => {}
        }
    }

    Ok(waypoint)
}

/// Read the text of an element up to its first nested element, consuming
/// everything through the element's end tag.
fn read_text_owned<'a>(reader: &mut Reader<'a>, start: &BytesStart<'_>) -> Result<String> {
    let mut text = String::new();
    let mut nested = false;

    loop {
        match reader.read_event()? {
            Event::Text(e) if !nested => {
                text.push_str(&normalize_newlines(std::str::from_utf8(e.as_ref())?))
            }
            Event::CData(e) if !nested => {
                text.push_str(&normalize_newlines(std::str::from_utf8(e.as_ref())?))
            }
            Event::GeneralRef(e) if !nested => text.push_str(&resolve_reference(&e)?),
            Event::Start(e) => {
                nested = true;
                reader.read_to_end(e.name())?;
            }
            Event::Empty(_) => nested = true,
            Event::End(e) if e.name() == start.name() => break,
            Event::End(_) => return Err(Gpx2CsvError::Malformed("unmatched end tag")),
            Event::Eof => return Err(Gpx2CsvError::Malformed("unexpected end of document")),
            _ => {}
        }
    }

    Ok(text)
}

/// Line ends in XML are reported as `\n`, whatever the file used.
fn normalize_newlines(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Normalize the whitespace of a raw attribute value, then unescape it.
/// Character references are resolved after normalizing, so `&#9;` stays a tab.
fn attribute_value(raw: &[u8]) -> Result<String> {
    let normalized = normalize_newlines(std::str::from_utf8(raw)?).replace(['\t', '\n'], " ");
    Ok(unescape(&normalized)?.into_owned())
}

/// Resolve a predefined entity (`&amp;`) or character reference (`&#60;`,
/// `&#x3C;`).
fn resolve_reference(e: &BytesRef<'_>) -> Result<String> {
    let name = std::str::from_utf8(e.as_ref())?;

    if let Some(value) = resolve_predefined_entity(name) {
        return Ok(value.to_string());
    }

    let code = name.strip_prefix('#').and_then(|num| match num.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => num.parse::<u32>().ok(),
    });

    code.and_then(char::from_u32)
        .map(String::from)
        .ok_or_else(|| Gpx2CsvError::UndefinedEntity(name.to_string()))
}
