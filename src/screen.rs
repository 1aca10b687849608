//! Terminal rendering of the three screens (home, clue, finish).
//!
//! The hunt session is only observed here. Anything purely cosmetic (hint
//! visibility, the invalid-attempt cue) lives in [`Presentation`].

use crate::hunt::{Feedback, HuntSession, Phase, Submission};
use crate::settings::Templates;
use crate::store::ProgressStore;
use anyhow::{Context, Result};
use minijinja::{context, Environment};
use std::path::Path;
use std::time::Instant;

pub const DEFAULT_HOME: &str = "\
Treasure Hunt
=============

Ready for a Treasure Hunt?

Solve each clue to advance: enter the answer and it gets checked right away.
Progress saves automatically, so you can stop and pick up later.

{{ total }} clue{{ '' if total == 1 else 's' }} stand between you and the treasure.
{% if interactive %}
Press Enter (or type :start) to begin.
{% else %}
Run `treasure-hunt start` to begin.
{% endif %}";

pub const DEFAULT_CLUE: &str = "\
Treasure Hunt  [{{ bar }}] {{ progress_percent }}%

Clue {{ clue_number }} of {{ total }}

{{ clue.text }}
{% if clue.image %}
(picture: {{ clue.image }})
{% endif %}
{% if clue.hint %}
{% if show_hint %}
Hint: {{ clue.hint }}
{% elif interactive %}
Need a hint? Type :hint
{% else %}
Need a hint? Run `treasure-hunt hint`
{% endif %}
{% endif %}
{% if feedback_message %}

{{ '!! ' if shake }}{{ feedback_message }}
{% endif %}";

pub const DEFAULT_FINISH: &str = "\
Treasure Hunt  [{{ bar }}] {{ progress_percent }}%

You found the treasure!
Great job solving all the clues.

{% if interactive %}
Press Enter (or type :restart) to play again.
{% else %}
Run `treasure-hunt restart` to play again.
{% endif %}";

const BAR_WIDTH: usize = 20;

fn feedback_message(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::EmptyInput => "Type an answer first",
        Feedback::Mismatch => "Not quite. Try again!",
    }
}

/// Presentation-only state: whether the hint is revealed and when the
/// invalid-attempt cue stops showing.
#[derive(Debug, Default)]
pub struct Presentation {
    pub interactive: bool,
    /// Clue index the hint was revealed for. A new clue hides it again.
    hint_for: Option<usize>,
    cue_until: Option<Instant>,
}

impl Presentation {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            ..Self::default()
        }
    }

    pub fn reveal_hint(&mut self, index: usize) {
        self.hint_for = Some(index);
    }

    /// React to a submission: arm the cue deadline on a rejection.
    pub fn observe(&mut self, submission: &Submission) {
        if let Submission::Rejected { cue, .. } = submission {
            self.cue_until = Some(Instant::now() + cue.duration);
        }
    }

    /// A deadline that already passed just reads as "no cue".
    pub fn shaking(&self) -> bool {
        self.cue_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn reset(&mut self) {
        self.hint_for = None;
        self.cue_until = None;
    }
}

/// Screen templates, validated once at startup.
pub struct Screens {
    home: String,
    clue: String,
    finish: String,
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
}

impl Screens {
    /// Resolve every template and make sure it parses.
    pub fn load(templates: &Templates, dir: &Path) -> Result<Self> {
        let screens = Self {
            home: templates.home.source(dir)?,
            clue: templates.clue.source(dir)?,
            finish: templates.finish.source(dir)?,
        };
        {
            let env = environment();
            for (name, src) in [
                ("home", &screens.home),
                ("clue", &screens.clue),
                ("finish", &screens.finish),
            ] {
                env.template_from_str(src)
                    .with_context(|| format!("parsing {name} template"))?;
            }
        }
        Ok(screens)
    }

    pub fn render<S: ProgressStore>(
        &self,
        session: &HuntSession<S>,
        presentation: &Presentation,
    ) -> Result<String> {
        let phase = session.phase();
        let src = match phase {
            Phase::NotStarted => &self.home,
            Phase::InProgress(_) => &self.clue,
            Phase::Finished => &self.finish,
        };

        let percent = session.progress() * 100.0;
        // The bar never looks empty once the hunt is underway.
        let bar_percent = if session.is_started() {
            percent.clamp(2.0, 100.0)
        } else {
            0.0
        };
        let filled = ((bar_percent / 100.0) * BAR_WIDTH as f64).ceil() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

        let (clue_number, show_hint) = match phase {
            Phase::InProgress(i) => (i + 1, presentation.hint_for == Some(i)),
            _ => (0, false),
        };
        let feedback = session.feedback();

        let env = environment();
        let tmpl = env
            .template_from_str(src)
            .with_context(|| format!("parsing {} template", phase.name()))?;
        let rendered = tmpl
            .render(context! {
                phase => phase.name(),
                interactive => presentation.interactive,
                total => session.total(),
                clue_number,
                clue => session.current_clue(),
                show_hint,
                feedback => feedback.map(|f| f.tag()),
                feedback_message => feedback.map(feedback_message),
                shake => presentation.shaking(),
                progress_percent => percent.round() as u64,
                bar,
                pending_input => session.pending_input(),
            })
            .with_context(|| format!("rendering {} screen", phase.name()))?;
        Ok(rendered.trim_end().to_string())
    }
}
