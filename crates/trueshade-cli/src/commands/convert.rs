//! Color conversion command

use crate::ConvertArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use trueshade_color::{format_hex, lab_to_rgb, parse_hex, rgb_to_lab};
use trueshade_core::LabColor;

/// Color given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Input {
    Rgb([u8; 3]),
    Lab(LabColor),
}

#[derive(Serialize)]
struct Conversion {
    rgb: [u8; 3],
    hex: String,
    lab: LabColor,
}

pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(color = %args.color, "convert::run");

    let input = parse_color(&args.color)?;
    let (rgb, lab) = match input {
        Input::Rgb(rgb) => (rgb, rgb_to_lab(rgb)),
        Input::Lab(lab) => (lab_to_rgb(lab), lab),
    };

    if verbose > 0 {
        if let Input::Lab(lab) = input {
            let back = rgb_to_lab(rgb);
            eprintln!("Gamut error after 8-bit encoding: dE {:.3}", lab.delta_e(back));
        }
    }

    let out = Conversion {
        rgb,
        hex: format_hex(rgb),
        lab,
    };
    if args.json {
        return super::write_json(&out, None);
    }
    println!("RGB:  {}, {}, {}", rgb[0], rgb[1], rgb[2]);
    println!("Hex:  {}", out.hex);
    println!("LAB:  {:.2}, {:.2}, {:.2}", lab.l, lab.a, lab.b);
    Ok(())
}

fn parse_color(s: &str) -> Result<Input> {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix("lab:") {
        let v = parse_triplet::<f32>(rest)?;
        return Ok(Input::Lab(LabColor::from_array(v)));
    }
    if let Some(rest) = s.strip_prefix("rgb:") {
        return Ok(Input::Rgb(parse_triplet::<u8>(rest)?));
    }
    if s.contains(',') {
        return Ok(Input::Rgb(parse_triplet::<u8>(s)?));
    }
    let rgb = parse_hex(s).with_context(|| format!("Unrecognized color: {s}"))?;
    Ok(Input::Rgb(rgb))
}

fn parse_triplet<T>(s: &str) -> Result<[T; 3]>
where
    T: std::str::FromStr + Copy,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("Expected three comma-separated values, got '{s}'");
    }
    let parse = |p: &str| p.parse::<T>().with_context(|| format!("Invalid component '{p}'"));
    Ok([parse(parts[0])?, parse(parts[1])?, parse(parts[2])?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_color("200,150,120").unwrap(), Input::Rgb([200, 150, 120]));
        assert_eq!(parse_color("rgb: 200, 150, 120").unwrap(), Input::Rgb([200, 150, 120]));
        assert_eq!(parse_color("#C89678").unwrap(), Input::Rgb([200, 150, 120]));
        assert_eq!(
            parse_color("lab:62.5,-4,20.1").unwrap(),
            Input::Lab(LabColor::new(62.5, -4.0, 20.1))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_color("300,0,0").is_err());
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("lab:a,b,c").is_err());
        assert!(parse_color("skin").is_err());
    }
}
