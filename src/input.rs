use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use mochigotchi::personality::BasePersonality;
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

/// What the player asked for this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Quit,
    HelpToggle,
    Back,
    FeedNeutral,
    FeedFlavored(BasePersonality),
    Play(BasePersonality),
    /// A minigame with a tag picked at random.
    PlayAny,
    Clean,
    Medicine,
    /// Tap the egg, or answer an open attention demand.
    Poke,
    /// Revive, ascend or start over after an escalation, whichever applies.
    Restart,
    CycleTimeMode,
    ToggleLights,
    WakeUp,
    CycleRoom,
    ActivateOversight,
    ToggleNotifications,
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

/// Map a key press to an action. While an overlay is open only the
/// global keys work; any other key closes it.
pub(crate) fn map_event_to_action(overlay_open: bool, ev: InputEvent) -> Option<Action> {
    if matches!(ev.key, KeyCode::Char('c') | KeyCode::Char('C'))
        && ev.mods.contains(KeyModifiers::CONTROL)
    {
        return Some(Action::Quit);
    }
    match ev.key {
        KeyCode::Char('h') | KeyCode::Char('H') => return Some(Action::HelpToggle),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Action::Quit),
        KeyCode::Esc => return Some(Action::Back),
        _ => {}
    }
    if overlay_open {
        return Some(Action::Back);
    }

    let KeyCode::Char(ch) = ev.key else {
        return None;
    };
    match ch.to_ascii_lowercase() {
        'f' => Some(Action::FeedNeutral),
        '1'..='5' => {
            let idx = ch as usize - '1' as usize;
            BasePersonality::FLAVORED
                .get(idx)
                .copied()
                .map(Action::FeedFlavored)
        }
        'a' => Some(Action::Play(BasePersonality::Anxious)),
        'e' => Some(Action::Play(BasePersonality::Edgy)),
        'g' => Some(Action::Play(BasePersonality::Geek)),
        's' => Some(Action::Play(BasePersonality::Sassy)),
        'i' => Some(Action::Play(BasePersonality::Intelectual)),
        'p' => Some(Action::PlayAny),
        'c' => Some(Action::Clean),
        'm' => Some(Action::Medicine),
        ' ' => Some(Action::Poke),
        'r' => Some(Action::Restart),
        't' => Some(Action::CycleTimeMode),
        'l' => Some(Action::ToggleLights),
        'w' => Some(Action::WakeUp),
        'd' => Some(Action::CycleRoom),
        'o' => Some(Action::ActivateOversight),
        'n' => Some(Action::ToggleNotifications),
        _ => None,
    }
}
