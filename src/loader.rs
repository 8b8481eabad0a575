use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::lineshape::{MHZ2WVN, WVN2MHZ};
use crate::predictions::Predictions;
use crate::qn::{decode_calpgm_int, QuantumNumbers};
use crate::state::{State, StateCollection};
use crate::transition::{Transition, TransitionCollection, Unit};

// ---------------------------------------------------------------------------
// Fixed-width parsing helpers
// ---------------------------------------------------------------------------

/// Column slice `[lo, hi)` of a line, clamped to its length. Short lines
/// yield empty fields, which the numeric parsers then reject with a proper
/// format error instead of a panic.
fn field(line: &str, lo: usize, hi: usize) -> &str {
    let hi = hi.min(line.len());
    if lo >= hi {
        return "";
    }
    line.get(lo..hi).unwrap_or("")
}

fn parse_f64(line_no: usize, s: &str, what: &str) -> Result<f64> {
    s.trim()
        .parse()
        .map_err(|_| CatalogError::format(line_no, format!("{what}: {s:?} is not a number")))
}

fn parse_i32(line_no: usize, s: &str, what: &str) -> Result<i32> {
    s.trim()
        .parse()
        .map_err(|_| CatalogError::format(line_no, format!("{what}: {s:?} is not an integer")))
}

/// Scale a (frequency, uncertainty) pair from the unit it was stored in to
/// the unit the caller asked for.
fn convert_pair(freq: f64, unc: f64, from: Unit, to: Unit) -> (f64, f64) {
    if from == to {
        return (freq, unc);
    }
    let k = match to {
        Unit::MHz => WVN2MHZ,
        Unit::Wvn => MHZ2WVN,
    };
    (freq * k, unc * k)
}

/// Parse a run of 2-character calpgm-encoded quantum numbers (trailing
/// blanks already stripped; a trailing odd character is ignored).
fn parse_cat_qn(s: &str) -> Result<QuantumNumbers> {
    let mut values = Vec::with_capacity(s.len() / 2);
    for i in 0..s.len() / 2 {
        values.push(Some(decode_calpgm_int(field(s, 2 * i, 2 * i + 2))?));
    }
    Ok(QuantumNumbers::new(values))
}

/// Parse a run of 3-character signed decimal quantum numbers.
fn parse_egy_qn(line_no: usize, s: &str) -> Result<QuantumNumbers> {
    let mut values = Vec::with_capacity(s.len() / 3);
    for i in 0..s.len() / 3 {
        values.push(Some(parse_i32(
            line_no,
            field(s, 3 * i, 3 * i + 3),
            "quantum number",
        )?));
    }
    Ok(QuantumNumbers::new(values))
}

// ---------------------------------------------------------------------------
// CAT loader
// ---------------------------------------------------------------------------

/// Load predictions from a calpgm cat-file.
///
/// `unit` is the unit transitions are converted to; the unit the file is in
/// is taken from `tunit` or, when `None`, auto-detected from the sign of
/// the first uncertainty field (negative means wavenumbers).
pub fn load_predictions(
    path: impl AsRef<Path>,
    unit: Unit,
    tunit: Option<Unit>,
) -> Result<Predictions> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let p = read_predictions(reader, unit, tunit)?;
    log::debug!(
        "loaded {} transitions from {}",
        p.len(),
        path.as_ref().display()
    );
    Ok(p)
}

/// Parse cat-format text from any buffered reader (local file or HTTP
/// response body). The first malformed line aborts the whole load.
pub fn read_predictions(
    reader: impl BufRead,
    unit: Unit,
    tunit: Option<Unit>,
) -> Result<Predictions> {
    let mut p = Predictions::new();
    // Once detected (or supplied), the file unit holds for every line.
    let mut file_unit = tunit;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;

        let calc_freq = parse_f64(line_no, field(&line, 0, 13), "calc_freq")?;
        let raw_unc = parse_f64(line_no, field(&line, 13, 21), "calc_unc")?;
        let intensity = 10f64.powf(parse_f64(line_no, field(&line, 21, 29), "log intensity")?);
        let _dof = parse_i32(line_no, field(&line, 29, 31), "degrees of freedom")?;
        let egy_low = parse_f64(line_no, field(&line, 31, 41), "egy_low")?;
        let gup = decode_calpgm_int(field(&line, 41, 44))?;
        let tag = parse_i32(line_no, field(&line, 44, 51), "tag")?;
        let qntag = parse_i32(line_no, field(&line, 51, 55), "qntag")?;

        // The quantum-number block is nominally [55, 79), but some lab
        // catalogs run wider; a purely numeric trailer means the block
        // extends to the end of the line. Best-effort heuristic, not a
        // format guarantee.
        let trailer = field(&line, 79, line.len());
        let qn_str = if !trailer.is_empty()
            && trailer.chars().any(|c| c.is_ascii_digit())
            && !trailer.chars().any(|c| c.is_ascii_alphabetic())
        {
            field(&line, 55, line.len())
        } else {
            field(&line, 55, 79)
        };
        let half = qn_str.len() / 2;
        let qn_up = parse_cat_qn(qn_str[..half].trim_end())?;
        let qn_low = parse_cat_qn(qn_str[half..].trim_end())?;

        let stored = *file_unit.get_or_insert(if raw_unc < 0.0 { Unit::Wvn } else { Unit::MHz });
        let (calc_freq, calc_unc) = convert_pair(calc_freq, raw_unc.abs(), stored, unit);

        p.add(Transition {
            calc_freq,
            calc_unc,
            intensity,
            egy_low,
            gup,
            tag,
            qntag,
            qn_up,
            qn_low,
            unit,
            ..Default::default()
        });
    }
    Ok(p)
}

// ---------------------------------------------------------------------------
// pamc2v loader (lab-specific prediction format)
// ---------------------------------------------------------------------------

/// Load predictions from a pamc2v output file: nine header lines, then one
/// transition per line with whitespace-separated quantum numbers up front
/// and reordered numeric columns. The upper-state degeneracy is derived as
/// 2J+1; the fit tags are not present in this format and are filled with
/// the 99999 placeholder.
pub fn load_predictions_pamc2v(
    path: impl AsRef<Path>,
    unit: Unit,
    tunit: Option<Unit>,
) -> Result<Predictions> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut p = Predictions::new();
    let mut file_unit = tunit;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        if line_no < 10 {
            continue;
        }

        let calc_freq = parse_f64(line_no, field(&line, 55, 69), "calc_freq")?;
        let raw_unc = parse_f64(line_no, field(&line, 70, 78), "calc_unc")?;
        let intensity = parse_f64(line_no, field(&line, 42, 55), "intensity")?;
        let egy_low = parse_f64(line_no, field(&line, 79, 91), "egy_low")?;

        let qn: Vec<i32> = field(&line, 0, 46)
            .split_whitespace()
            .map(|tok| parse_i32(line_no, tok, "quantum number"))
            .collect::<Result<_>>()?;
        if qn.len() < 11 {
            return Err(CatalogError::format(
                line_no,
                format!("expected 11 quantum-number tokens, found {}", qn.len()),
            ));
        }
        let qn_up = QuantumNumbers::from(vec![qn[2], qn[3], qn[4], qn[1], qn[10]]);
        let qn_low = QuantumNumbers::from(vec![qn[7], qn[8], qn[9], qn[6], qn[10]]);
        let gup = 2 * qn[2] + 1;

        let stored = *file_unit.get_or_insert(if raw_unc < 0.0 { Unit::Wvn } else { Unit::MHz });
        let (calc_freq, calc_unc) = convert_pair(calc_freq, raw_unc.abs(), stored, unit);

        p.add(Transition {
            calc_freq,
            calc_unc,
            intensity,
            egy_low,
            gup,
            tag: 99999,
            qntag: 99999,
            qn_up,
            qn_low,
            unit,
            ..Default::default()
        });
    }
    log::debug!(
        "loaded {} pamc2v transitions from {}",
        p.len(),
        path.as_ref().display()
    );
    Ok(p)
}

// ---------------------------------------------------------------------------
// EGY loader
// ---------------------------------------------------------------------------

/// Load energy levels from a calpgm egy-file.
pub fn load_egy(path: impl AsRef<Path>) -> Result<StateCollection> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut states = StateCollection::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;

        let blk = field(&line, 0, 6).trim();
        let idx = field(&line, 6, 11).trim();
        let energy = parse_f64(line_no, field(&line, 11, 29), "energy")?;
        let acc = field(&line, 29, 47).trim();
        let mix = field(&line, 47, 58).trim();
        let degeneracy = parse_i32(line_no, field(&line, 58, 63), "degeneracy")?;
        let qn = parse_egy_qn(line_no, field(&line, 64, line.len()).trim_end())?;

        let mut state = State::new(qn, energy, Some(degeneracy));
        state.block = if blk.is_empty() {
            None
        } else {
            Some(parse_i32(line_no, blk, "block")?)
        };
        state.index = if idx.is_empty() {
            None
        } else {
            Some(parse_i32(line_no, idx, "index")?)
        };
        state.accuracy = if acc.is_empty() {
            None
        } else {
            Some(parse_f64(line_no, acc, "accuracy")?)
        };
        state.mixing = if mix.is_empty() {
            None
        } else {
            Some(parse_f64(line_no, mix, "mixing coefficient")?)
        };
        states.add_state(state);
    }
    log::debug!(
        "loaded {} states from {}",
        states.len(),
        path.as_ref().display()
    );
    Ok(states)
}

// ---------------------------------------------------------------------------
// LIN loader
// ---------------------------------------------------------------------------

/// Load experimentally assigned lines from a calpgm lin-file.
///
/// The first 36 characters hold whitespace-separated quantum numbers split
/// evenly between the upper and lower state; the remainder is frequency,
/// uncertainty (sign encodes the unit, as in cat-files, but per line), and
/// a free-form comment. The calculated fields mirror the experimental ones
/// so that frequency filtering and simulation work on the result.
pub fn load_lin(path: impl AsRef<Path>, unit: Unit) -> Result<TransitionCollection> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut coll = TransitionCollection::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;

        let qn: Vec<i32> = field(&line, 0, 36)
            .split_whitespace()
            .map(|tok| parse_i32(line_no, tok, "quantum number"))
            .collect::<Result<_>>()?;
        let half = qn.len() / 2;
        let qn_up = QuantumNumbers::from(qn[..half].to_vec());
        let qn_low = QuantumNumbers::from(qn[half..].to_vec());

        let rest = field(&line, 36, line.len());
        let mut tokens = rest.split_whitespace();
        let freq = parse_f64(
            line_no,
            tokens.next().unwrap_or(""),
            "frequency",
        )?;
        let raw_unc = parse_f64(
            line_no,
            tokens.next().unwrap_or(""),
            "uncertainty",
        )?;
        let comment: String = tokens.collect::<Vec<_>>().join(" ");

        let (stored, unc) = if raw_unc < 0.0 {
            (Unit::Wvn, -raw_unc)
        } else {
            (Unit::MHz, raw_unc)
        };
        let (freq, unc) = convert_pair(freq, unc, stored, unit);

        coll.add(Transition {
            calc_freq: freq,
            calc_unc: unc,
            exp_freq: Some(freq),
            exp_unc: Some(unc),
            qn_up,
            qn_low,
            unit,
            comment: if comment.is_empty() {
                None
            } else {
                Some(comment)
            },
            ..Default::default()
        });
    }
    Ok(coll)
}

// ---------------------------------------------------------------------------
// Xu state-list converter (lab-specific)
// ---------------------------------------------------------------------------

/// Convert a Li-Hong-Xu style A/E-symmetry torsional state list into a
/// [`StateCollection`]. Lines look like
///
/// ```text
/// A VT =   0 N =   1 K =   1 E =   139.3880893768 +   E = 139.4159179687 -
/// ```
///
/// and carry one state per parity (K = 0 A-symmetry lines carry one). The
/// Kc label is assigned from the energy ordering of the parity pair, the
/// vibrational index is 3v for A and 3v+1 / 3v+2 for the two E components,
/// and the degeneracy is 2N+1. Non-state lines are skipped.
pub fn load_xu_states(path: impl AsRef<Path>) -> Result<StateCollection> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut states = StateCollection::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let rot_sym = match tokens.first() {
            Some(&"A") => 'A',
            Some(&"E") => 'E',
            _ => continue,
        };
        if tokens.get(1) != Some(&"VT") {
            continue;
        }

        let tok = |idx: usize| -> Result<&str> {
            tokens.get(idx).copied().ok_or_else(|| {
                CatalogError::format(line_no, format!("missing token {idx} in state line"))
            })
        };
        let v = parse_i32(line_no, tok(3)?, "vt")?;
        let n = parse_i32(line_no, tok(6)?, "N")?;
        let k = parse_i32(line_no, tok(9)?, "K")?;
        let e1 = parse_f64(line_no, tok(12)?, "energy")?;
        let sym1 = parse_i32(line_no, &format!("{}1", tok(13)?), "parity")?;
        let degeneracy = 2 * n + 1;

        // K = 0 A-symmetry levels have no parity partner.
        let pair = if k == 0 && rot_sym == 'A' {
            None
        } else {
            let e2 = parse_f64(line_no, tok(16)?, "energy")?;
            let sym2 = parse_i32(line_no, &format!("{}1", tok(17)?), "parity")?;
            Some((e2, sym2))
        };

        let (vib1, vib2) = match rot_sym {
            'A' => (v * 3, v * 3),
            _ => (v * 3 + 1, v * 3 + 2),
        };

        let (kc1, kc2) = if k == 0 {
            (n, n)
        } else {
            let e2 = pair.map(|(e, _)| e).unwrap_or(f64::MAX);
            if e1 > e2 {
                (n - k, n - k + 1)
            } else {
                (n - k + 1, n - k)
            }
        };

        states.add_state(State::new(
            QuantumNumbers::from(vec![n, k, kc1, vib1, sym1]),
            e1,
            Some(degeneracy),
        ));
        if let Some((e2, sym2)) = pair {
            if k > 0 {
                states.add_state(State::new(
                    QuantumNumbers::from(vec![n, k, kc2, vib2, sym2]),
                    e2,
                    Some(degeneracy),
                ));
            }
        }
    }

    // Zero-point energy from the torsional-rotational origin, when present.
    let origin = states.filter(&QuantumNumbers::from(vec![0, 0, 0, 0]));
    if origin.len() == 1 {
        states.zero_point_energy = Some(states.states[origin[0]].energy);
    } else {
        log::warn!("could not determine zero-point energy from state list");
    }
    Ok(states)
}

// ---------------------------------------------------------------------------
// CDMS network loader
// ---------------------------------------------------------------------------

/// Fetch predictions for one species from the CDMS database and parse the
/// spcat-format payload exactly like a local cat-file. Temperatures other
/// than 300 K request the 150 K environment tables. `timeout` bounds the
/// whole HTTP exchange.
#[cfg(feature = "fetch")]
pub fn load_predictions_from_cdms(
    species_id: u32,
    freq_from: f64,
    freq_to: f64,
    temperature: f64,
    order_by: &str,
    timeout: std::time::Duration,
) -> Result<Predictions> {
    let temp_clause = if temperature != 300.0 {
        "and+EnvironmentTemperature=150+"
    } else {
        ""
    };
    let url = format!(
        "http://cdms.ph1.uni-koeln.de/cdms/tap/sync?REQUEST=doQuery&LANG=VSS2&FORMAT=spcat\
         &QUERY=SELECT+RadiativeTransitions+WHERE+SpeciesID={species_id}+{temp_clause}\
         and+RadTransFrequency>{freq_from}+and+RadTransFrequency<{freq_to}&ORDERBY={order_by}"
    );
    log::info!("querying CDMS: {url}");

    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = agent
        .get(&url)
        .call()
        .map_err(|e| CatalogError::Fetch(Box::new(e)))?;
    read_predictions(BufReader::new(response.into_reader()), Unit::MHz, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const CAT_LINE: &str = "    1234.5678  0.0500 -3.2000 3  123.4500  5  123456789 1 0 1       0 0 0      ";

    fn write_temp(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn cat_line_parses_field_by_field() {
        let p = read_predictions(Cursor::new(CAT_LINE), Unit::MHz, None).unwrap();
        assert_eq!(p.len(), 1);
        let t = &p.transitions.transitions[0];
        assert_eq!(t.calc_freq, 1234.5678);
        assert_eq!(t.calc_unc, 0.05);
        assert!((t.intensity - 10f64.powf(-3.2)).abs() < 1e-12);
        assert_eq!(t.egy_low, 123.45);
        assert_eq!(t.gup, 5);
        assert_eq!(t.tag, 12345);
        assert_eq!(t.qntag, 6789);
        assert_eq!(t.unit, Unit::MHz);
        assert_eq!(t.qn_up, QuantumNumbers::from(vec![1, 0, 1]));
        assert_eq!(t.qn_low, QuantumNumbers::from(vec![0, 0, 0]));
    }

    #[test]
    fn cat_loader_reads_files() {
        let two_lines = format!("{CAT_LINE}\n{CAT_LINE}\n");
        let (_dir, path) = write_temp(&two_lines);
        let p = load_predictions(&path, Unit::MHz, None).unwrap();
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn negative_uncertainty_means_wavenumbers() {
        let line = CAT_LINE.replace("  0.0500", " -0.0500");
        let p = read_predictions(Cursor::new(line), Unit::MHz, None).unwrap();
        let t = &p.transitions.transitions[0];
        // Stored in cm^-1, converted to the requested MHz.
        assert!((t.calc_freq - 1234.5678 * 29979.2458).abs() < 1e-6);
        assert!((t.calc_unc - 0.05 * 29979.2458).abs() < 1e-9);
        assert_eq!(t.unit, Unit::MHz);
    }

    #[test]
    fn explicit_tunit_overrides_detection() {
        let p = read_predictions(Cursor::new(CAT_LINE), Unit::Wvn, Some(Unit::MHz)).unwrap();
        let t = &p.transitions.transitions[0];
        assert!((t.calc_freq - 1234.5678 / 29979.2458).abs() < 1e-12);
        assert_eq!(t.unit, Unit::Wvn);
    }

    #[test]
    fn letter_encoded_quantum_numbers_decode() {
        // J = 100 in the upper state encodes as "A0".
        let line = CAT_LINE.replace(" 1 0 1      ", "A0 0 1      ");
        let p = read_predictions(Cursor::new(line), Unit::MHz, None).unwrap();
        assert_eq!(
            p.transitions.transitions[0].qn_up,
            QuantumNumbers::from(vec![100, 0, 1])
        );
    }

    #[test]
    fn numeric_trailer_extends_the_qn_block() {
        // 28-character block: seven quantum numbers per side.
        let block = " 1 0 1 2 3 4 5 0 0 0 1 2 3 4";
        let line = format!("{}{}", &CAT_LINE[..55], block);
        let p = read_predictions(Cursor::new(line), Unit::MHz, None).unwrap();
        let t = &p.transitions.transitions[0];
        assert_eq!(t.qn_up, QuantumNumbers::from(vec![1, 0, 1, 2, 3, 4, 5]));
        assert_eq!(t.qn_low, QuantumNumbers::from(vec![0, 0, 0, 1, 2, 3, 4]));
    }

    #[test]
    fn malformed_line_aborts_the_load() {
        let bad = CAT_LINE.replace("  123.4500", "  not_nums");
        let text = format!("{CAT_LINE}\n{bad}\n");
        let err = read_predictions(Cursor::new(text), Unit::MHz, None).unwrap_err();
        assert!(matches!(err, CatalogError::Format { line: 2, .. }));
    }

    #[test]
    fn egy_line_parses() {
        let line =
            "     1    1          0.000000                                 1:  0  0  0";
        let (_dir, path) = write_temp(line);
        let states = load_egy(&path).unwrap();
        assert_eq!(states.len(), 1);
        let s = &states.states[0];
        assert_eq!(s.block, Some(1));
        assert_eq!(s.index, Some(1));
        assert_eq!(s.energy, 0.0);
        assert_eq!(s.accuracy, None);
        assert_eq!(s.degeneracy, Some(1));
        assert_eq!(s.qn, QuantumNumbers::from(vec![0, 0, 0]));
    }

    #[test]
    fn egy_round_trips_through_save() {
        let line =
            "     1    2         12.345678          0.000100               3:  1  0  1";
        let (_dir, path) = write_temp(line);
        let states = load_egy(&path).unwrap();

        let out = path.with_extension("egy");
        states.save(&out).unwrap();
        let reloaded = load_egy(&out).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.states[0].energy, states.states[0].energy);
        assert_eq!(reloaded.states[0].qn, states.states[0].qn);
        assert_eq!(reloaded.states[0].accuracy, Some(0.0001));
    }

    #[test]
    fn lin_line_parses() {
        let qn_block = format!("{:<36}", "  2  1  1  1  1  0");
        let line = format!("{qn_block}  12345.6789  0.0050 blended line");
        let (_dir, path) = write_temp(&line);
        let coll = load_lin(&path, Unit::MHz).unwrap();
        assert_eq!(coll.len(), 1);
        let t = &coll.transitions[0];
        assert_eq!(t.qn_up, QuantumNumbers::from(vec![2, 1, 1]));
        assert_eq!(t.qn_low, QuantumNumbers::from(vec![1, 1, 0]));
        assert_eq!(t.exp_freq, Some(12345.6789));
        assert_eq!(t.exp_unc, Some(0.005));
        assert_eq!(t.comment.as_deref(), Some("blended line"));
    }

    #[test]
    fn lin_negative_uncertainty_converts_per_line() {
        let qn_block = format!("{:<36}", "  1  0  1  0  0  0");
        let line = format!("{qn_block}  41.1234 -0.0001");
        let (_dir, path) = write_temp(&line);
        let coll = load_lin(&path, Unit::MHz).unwrap();
        let t = &coll.transitions[0];
        assert!((t.exp_freq.unwrap() - 41.1234 * 29979.2458).abs() < 1e-6);
        assert!((t.exp_unc.unwrap() - 0.0001 * 29979.2458).abs() < 1e-9);
    }

    #[test]
    fn pamc2v_reorders_columns() {
        let mut text = String::new();
        for i in 0..9 {
            text.push_str(&format!("header line {i}\n"));
        }
        let qn = format!("{:<42}", "  1  1  2  1  1  0  1  1  1  0  0");
        text.push_str(&format!(
            "{qn}    1.230E-03    12345.6789   0.0500     123.4500\n"
        ));
        let (_dir, path) = write_temp(&text);
        let p = load_predictions_pamc2v(&path, Unit::MHz, None).unwrap();
        assert_eq!(p.len(), 1);
        let t = &p.transitions.transitions[0];
        assert_eq!(t.calc_freq, 12345.6789);
        assert_eq!(t.calc_unc, 0.05);
        assert_eq!(t.intensity, 1.23e-3);
        assert_eq!(t.egy_low, 123.45);
        assert_eq!(t.gup, 5);
        assert_eq!(t.tag, 99999);
        assert_eq!(t.qn_up, QuantumNumbers::from(vec![2, 1, 1, 1, 0]));
        assert_eq!(t.qn_low, QuantumNumbers::from(vec![1, 1, 0, 1, 0]));
    }

    #[test]
    fn xu_states_split_parity_pairs() {
        let text = "\
some preamble that is skipped\n\
A VT =   0 N =   0 K =   0 E =     0.0000000000 +\n\
A VT =   0 N =   1 K =   1 E =   139.3880893768 +   E = 139.4159179687 -\n\
E VT =   0 N =   1 K =   1 E =   130.1000000000 +   E = 131.2000000000 -\n";
        let (_dir, path) = write_temp(text);
        let states = load_xu_states(&path).unwrap();
        // 1 origin + 2 A-parity partners + 2 E-parity partners.
        assert_eq!(states.len(), 5);

        assert_eq!(states.zero_point_energy, Some(0.0));
        assert_eq!(states.states[0].qn, QuantumNumbers::from(vec![0, 0, 0, 0, 1]));

        // E1 < E2, so the first partner takes Kc = N - K + 1.
        assert_eq!(states.states[1].qn, QuantumNumbers::from(vec![1, 1, 1, 0, 1]));
        assert_eq!(states.states[2].qn, QuantumNumbers::from(vec![1, 1, 0, 0, -1]));
        assert_eq!(states.states[1].degeneracy, Some(3));

        // E-symmetry levels land in the 3v+1 / 3v+2 vibrational slots.
        assert_eq!(states.states[3].qn, QuantumNumbers::from(vec![1, 1, 1, 1, 1]));
        assert_eq!(states.states[4].qn, QuantumNumbers::from(vec![1, 1, 0, 2, -1]));
    }
}
