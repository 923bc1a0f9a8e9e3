use std::env;

use tracing_subscriber::EnvFilter;

use fp::Fpcr;

mod edit;

use edit::{Edit, EditError, parse_value};

const USAGE: &str = "usage: fpcr <VALUE> [FIELD=VALUE ...]
  VALUE   raw register value, hex (0x...) or decimal
  FIELD   ahp dn fz fz16 ide ixe ufe ofe dze ioe (0/1)
          rmode (rn rp rm rz or 0..3), stride (1 or 2), len (1..8)";

fn main() {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(writer)
        .init();

    let args = env::args().skip(1).collect::<Vec<String>>();

    let Some((value, edits)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    match run(value, edits) {
        Ok(fpcr) => println!("{fpcr}"),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}

fn run(value: &str, edits: &[String]) -> Result<Fpcr, EditError> {
    let raw = parse_value(value)?;
    let mut fpcr = Fpcr::from_raw(raw);
    if fpcr.value() != raw {
        tracing::warn!(
            "reserved bits 0x{:08X} cleared from 0x{raw:08X}",
            raw & !Fpcr::MASK
        );
    }
    tracing::info!("loaded FPCR=0x{:08X}", fpcr.value());

    // Validate every edit before touching the register.
    let edits = edits
        .iter()
        .map(|e| e.parse::<Edit>())
        .collect::<Result<Vec<_>, _>>()?;

    for edit in edits {
        edit.apply(&mut fpcr);
    }

    Ok(fpcr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(edits: &[&str]) -> Vec<String> {
        edits.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn run_without_edits_masks() {
        let fpcr = run("0xFFFFFFFF", &[]).unwrap();
        assert_eq!(fpcr.value(), Fpcr::MASK);
    }

    #[test]
    fn run_applies_edits_in_order() {
        let fpcr = run("0", &args(&["len=3", "dze=1", "len=5"])).unwrap();
        assert_eq!(fpcr.len(), 5);
        assert!(fpcr.dze());
    }

    #[test]
    fn run_rejects_out_of_domain_edit() {
        assert_eq!(
            run("0", &args(&["dze=1", "len=9"])),
            Err(EditError::InvalidLen("9".to_string()))
        );
    }

    #[test]
    fn run_rejects_bad_value() {
        assert!(run("0xZZ", &[]).is_err());
    }

    #[test]
    fn run_random_len() {
        let len = (rand::random::<u32>() % 8 + 1) as usize;
        let fpcr = run("0x00C00000", &args(&[format!("len={len}").as_str()])).unwrap();
        assert_eq!(fpcr.len(), len);
        assert_eq!(fpcr.rmode(), fp::RoundingMode::TowardsZero);
    }
}
