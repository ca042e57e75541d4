use std::fs;
use std::path::Path;

use nalgebra::Point3;
use thiserror::Error;

use crate::model::{CelestialBody, SolarSystem};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog line {line}: {message}")]
    Malformed { line: usize, message: String },
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<SolarSystem, CatalogError> {
    parse(&fs::read_to_string(path)?)
}

/// Parses the body catalog: one whitespace-separated row per body, first
/// (header) line skipped. Columns: name radius distance speed base detail
/// ring moon. A `-` marks a ringless or moonless body.
pub fn parse(text: &str) -> Result<SolarSystem, CatalogError> {
    let mut bodies = vec![];

    // Read lines, skipping header
    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let mut fields = line.split_ascii_whitespace();
        let mut next_field = |what: &str| {
            fields.next().ok_or_else(|| CatalogError::Malformed {
                line: lineno,
                message: format!("missing field '{}'", what),
            })
        };

        let name = next_field("name")?.to_owned();
        let radius = parse_number::<f32>(next_field("radius")?, lineno)?;
        let orbital_distance = parse_number::<f32>(next_field("distance")?, lineno)?;
        let orbital_speed = parse_number::<f64>(next_field("speed")?, lineno)?;
        let base_color = parse_color(next_field("base")?, lineno)?;
        let detail_color = parse_color(next_field("detail")?, lineno)?;

        let ring_color = match next_field("ring")? {
            "-" => None,
            s => Some(parse_color(s, lineno)?),
        };
        let has_moon = match next_field("moon")? {
            "-" => false,
            "moon" => true,
            s => {
                return Err(CatalogError::Malformed {
                    line: lineno,
                    message: format!("bad moon flag '{}'", s),
                })
            }
        };

        bodies.push(CelestialBody {
            name,
            radius,
            orbital_distance,
            orbital_speed,
            base_color,
            detail_color,
            ring_color,
            has_moon,
        });
    }

    Ok(SolarSystem::new(bodies))
}

fn parse_number<T: std::str::FromStr>(s: &str, line: usize) -> Result<T, CatalogError> {
    s.parse().map_err(|_| CatalogError::Malformed {
        line,
        message: format!("bad number '{}'", s),
    })
}

fn parse_color(s: &str, line: usize) -> Result<Point3<f32>, CatalogError> {
    let bad = || CatalogError::Malformed {
        line,
        message: format!("bad color '{}'", s),
    };
    if s.len() != 6 {
        return Err(bad());
    }
    let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| bad())?;
    let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| bad())?;
    let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| bad())?;

    Ok(Point3::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    ))
}
