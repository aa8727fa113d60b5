//! LAB classification command

use crate::ClassifyArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::Result;
use serde::Serialize;
use trueshade_color::format_hex;
use trueshade_core::{LabColor, Undertone};
use trueshade_engine::{ChannelColors, SkinProfile, ToneCode};

#[derive(Serialize)]
struct Classification {
    lab: LabColor,
    undertone: Undertone,
    code: ToneCode,
    colors: ChannelColors,
}

pub fn run(args: ClassifyArgs, verbose: u8) -> Result<()> {
    trace!(l = args.l, a = args.a, b = args.b, "classify::run");

    let lab = LabColor::new(args.l, args.a, args.b);
    if verbose > 0 && lab.to_array() != [args.l, args.a, args.b] {
        eprintln!("Input clamped to {lab}");
    }
    let profile = SkinProfile::from_lab(lab);

    if args.json {
        return super::write_json(
            &Classification {
                lab,
                undertone: profile.undertone,
                code: profile.code,
                colors: profile.visualization,
            },
            None,
        );
    }

    let v = profile.visualization;
    println!("LAB:        {lab}");
    println!("Undertone:  {}", profile.undertone);
    println!("Tone code:  {}", profile.code);
    println!("Combined:   {}", format_hex(v.combined));
    println!("L channel:  {}", format_hex(v.l_only));
    println!("A channel:  {}", format_hex(v.a_only));
    println!("B channel:  {}", format_hex(v.b_only));
    Ok(())
}
