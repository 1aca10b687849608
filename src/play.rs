use crate::hunt::{HuntSession, Phase};
use crate::screen::{Presentation, Screens};
use crate::store::ProgressStore;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  :start     begin the hunt (Enter works too)
  :hint      reveal the hint for this clue
  :restart   erase progress and go back to the start
  :help      show this list
  :quit      leave; progress is kept
Anything else, including other :words, is checked as your answer.";

enum Command<'a> {
    Start,
    Hint,
    Restart,
    Help,
    Quit,
    Unknown(&'a str),
    Text(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    match line.trim() {
        ":start" => Command::Start,
        ":hint" => Command::Hint,
        ":restart" => Command::Restart,
        ":help" | ":?" => Command::Help,
        ":quit" | ":q" | ":exit" => Command::Quit,
        cmd if cmd.starts_with(':') => Command::Unknown(cmd),
        _ => Command::Text(line),
    }
}

/// Interactive loop: draw the current screen, read one line, dispatch it.
/// Returns on `:quit` or end of input.
pub fn run<S, R, W>(
    session: &mut HuntSession<S>,
    screens: &Screens,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: ProgressStore,
    R: BufRead,
    W: Write,
{
    let mut presentation = Presentation::new(true);
    let mut lines = input.lines();
    let mut notice: Option<String> = None;

    loop {
        writeln!(out, "\n{}", screens.render(session, &presentation)?)?;
        if let Some(n) = notice.take() {
            writeln!(out, "\n{n}")?;
        }
        write!(out, "\n> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("reading input")?;

        match parse(&line) {
            Command::Quit => break,
            Command::Help => notice = Some(HELP.into()),
            Command::Restart => {
                session.restart();
                presentation.reset();
            }
            Command::Start => match session.phase() {
                Phase::NotStarted => session.start(),
                _ => notice = Some("The hunt is already underway.".into()),
            },
            Command::Hint => match session.phase() {
                Phase::InProgress(i) if session.current_clue().is_some_and(|c| c.hint.is_some()) => {
                    presentation.reveal_hint(i)
                }
                Phase::InProgress(_) => notice = Some("No hint for this one.".into()),
                _ => notice = Some("There is no clue on screen.".into()),
            },
            Command::Unknown(text) if matches!(session.phase(), Phase::InProgress(_)) => {
                submit(session, &mut presentation, text)?
            }
            Command::Unknown(cmd) => {
                notice = Some(format!("Unknown command {cmd}. Type :help for the list."))
            }
            Command::Text(text) => match session.phase() {
                Phase::NotStarted if text.trim().is_empty() => session.start(),
                Phase::NotStarted => notice = Some("Press Enter or type :start to begin.".into()),
                Phase::InProgress(_) => submit(session, &mut presentation, text)?,
                Phase::Finished if text.trim().is_empty() => {
                    session.restart();
                    presentation.reset();
                }
                Phase::Finished => {
                    notice = Some("Press Enter or type :restart to play again.".into())
                }
            },
        }
    }

    if session.is_started() {
        writeln!(out, "Progress saved. Run again to pick up where you left off.")?;
    }
    Ok(())
}

fn submit<S: ProgressStore>(
    session: &mut HuntSession<S>,
    presentation: &mut Presentation,
    text: &str,
) -> Result<()> {
    session.set_input(text);
    let submission = session.submit_pending()?;
    presentation.observe(&submission);
    Ok(())
}
