pub mod config;
pub mod investigation;
pub mod ledger;
pub mod suspects;
pub mod tree;

use std::io::{BufRead, Write};

use anyhow::Result;
use log::{debug, info};

use crate::game::config::Mansion;
use crate::game::investigation::{
    Accusation, Command, Investigation, Progress, StepReport, Verdict, Visit,
};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Prompt and read one trimmed line. `None` means the input is exhausted.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    // Undecodable bytes become U+FFFD and fail command parsing like any typo
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        debug!("Input closed");
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
}

// ---------------------------------------------------------------------------
// Exploring
// ---------------------------------------------------------------------------

fn show_visit<W: Write>(out: &mut W, visit: &Visit<'_>) -> Result<()> {
    writeln!(out, "\nYou are in: {}", visit.room.name)?;
    match visit.clue {
        Some(clue) if visit.new_clue => writeln!(out, "You found a clue: {clue}")?,
        Some(clue) => writeln!(out, "Already noted the clue here: {clue}")?,
        None => writeln!(out, "Nothing of interest here.")?,
    }
    Ok(())
}

/// Walk the mansion until the player stops or reaches a dead end.
fn explore<'m, R: BufRead, W: Write>(
    mansion: &'m Mansion,
    input: &mut R,
    out: &mut W,
) -> Result<Accusation<'m>> {
    let (mut progress, visit) = Investigation::begin(mansion);
    show_visit(out, &visit)?;

    loop {
        let investigation = match progress {
            Progress::Accusing(accusation) => return Ok(accusation),
            Progress::Exploring(investigation) => investigation,
        };

        // Only offer the ways that lead somewhere
        let mut options: Vec<String> = investigation
            .open_directions()
            .iter()
            .map(|side| side.to_string())
            .collect();
        options.push("stop".into());
        let prompt = format!(
            "[{} clue(s)] Where to? ({}): ",
            investigation.ledger().len(),
            options.join(", ")
        );

        let command = match read_line(input, out, &prompt)? {
            None => Command::Stop,
            Some(line) => match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "Invalid option: {e}")?;
                    progress = Progress::Exploring(investigation);
                    continue;
                }
            },
        };
        debug!("Command: {command:?}");

        let (next, report) = investigation.advance(command);
        match report {
            StepReport::Entered(visit) => show_visit(out, &visit)?,
            StepReport::NoPassage(side) => writeln!(out, "There is no passage to the {side}.")?,
            StepReport::Stopped => writeln!(out, "Ending the exploration.")?,
        }
        progress = next;
    }
}

// ---------------------------------------------------------------------------
// Accusing
// ---------------------------------------------------------------------------

fn accuse<R: BufRead, W: Write>(
    accusation: Accusation<'_>,
    input: &mut R,
    out: &mut W,
) -> Result<Verdict> {
    writeln!(out, "\nClues collected:")?;
    if accusation.ledger().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for clue in accusation.ledger() {
        writeln!(out, "- {clue}")?;
    }

    let suspects: Vec<&str> = accusation.tallies().into_iter().map(|(name, _)| name).collect();
    if !suspects.is_empty() {
        writeln!(out, "\nSuspects: {}", suspects.join(", "))?;
    }

    let accused = read_line(input, out, "\nWho do you accuse? ")?.unwrap_or_default();
    Ok(accusation.accuse(&accused))
}

fn show_verdict<W: Write>(out: &mut W, verdict: &Verdict) -> Result<()> {
    writeln!(out, "\n========================================")?;
    writeln!(out, "             CASE CLOSED")?;
    writeln!(out, "========================================")?;
    if verdict.is_win() {
        writeln!(
            out,
            "  Solved! {} is the culprit, with {} clue(s) against them.",
            verdict.accused, verdict.tally
        )?;
    } else {
        writeln!(
            out,
            "  Insufficient evidence against {} ({} clue(s), {} needed).",
            verdict.accused, verdict.tally, verdict.threshold
        )?;
    }
    writeln!(out, "========================================\n")?;
    writeln!(out, "  [r] Restart    [q] Quit\n")?;
    Ok(())
}

/// Read the player's post-game choice. Returns `true` to restart, `false` to quit.
fn prompt_restart<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    loop {
        let Some(choice) = read_line(input, out, "> ")? else {
            return Ok(false);
        };
        match choice.to_lowercase().as_str() {
            "r" => return Ok(true),
            "q" => return Ok(false),
            _ => writeln!(out, "  Press [r] to restart or [q] to quit.")?,
        }
    }
}

// ---------------------------------------------------------------------------
// Single game round
// ---------------------------------------------------------------------------

fn play_round<R: BufRead, W: Write>(mansion: &Mansion, input: &mut R, out: &mut W) -> Result<Verdict> {
    let accusation = explore(mansion, input, out)?;
    info!(
        "Exploration ended in {} with {} clue(s)",
        accusation.final_room().name,
        accusation.ledger().len()
    );
    accuse(accusation, input, out)
}

// ---------------------------------------------------------------------------
// Public entry point: runs rounds until the player quits
// ---------------------------------------------------------------------------

pub fn run<R: BufRead, W: Write>(mansion: &Mansion, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        writeln!(out, "\n========================================")?;
        writeln!(out, "             DETECTIVE QUEST")?;
        writeln!(out, "========================================")?;
        writeln!(out, "Explore the mansion and collect clues.")?;
        writeln!(out, "Then name the culprit.\n")?;

        let verdict = play_round(mansion, input, out)?;
        show_verdict(out, &verdict)?;

        if !prompt_restart(input, out)? {
            writeln!(out, "Thanks for playing!")?;
            break;
        }

        info!("Player chose to restart");
    }

    Ok(())
}
