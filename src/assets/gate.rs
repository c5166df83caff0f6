//! Readiness gate for the background and player sprites.
//!
//! Loads are requested here and completed by whoever runs the provider.
//! Every request carries a generation so a completion that arrives after the
//! source was swapped again is ignored. The simulation only runs while
//! every slot holds a decoded image.

use super::{AssetError, AssetKind, AssetSource, BuiltinAsset, Image, SpriteSources};
use crate::core::player::VisualMode;

/// Identifies one outstanding load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub kind: AssetKind,
    pub generation: u64,
}

/// A load the host should run through an [`super::AssetProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub source: AssetSource,
}

#[derive(Debug, Clone, PartialEq)]
enum SlotState {
    Pending,
    Ready(Image),
    Failed(String),
}

#[derive(Debug, Clone)]
struct Slot {
    source: AssetSource,
    generation: u64,
    state: SlotState,
}

impl Slot {
    fn new(source: AssetSource) -> Self {
        Self {
            source,
            generation: 0,
            state: SlotState::Pending,
        }
    }

    fn image(&self) -> Option<&Image> {
        match &self.state {
            SlotState::Ready(image) => Some(image),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetGate {
    background: Slot,
    sprites: [Slot; 3],
    next_generation: u64,
}

fn sprite_index(mode: VisualMode) -> usize {
    match mode {
        VisualMode::Resting => 0,
        VisualMode::Flapping => 1,
        VisualMode::Defeated => 2,
    }
}

impl AssetGate {
    /// A gate with nothing loaded yet. Call the request methods to start.
    pub fn new(background: AssetSource, sprites: SpriteSources) -> Self {
        Self {
            background: Slot::new(background),
            sprites: [
                Slot::new(sprites.resting),
                Slot::new(sprites.flapping),
                Slot::new(sprites.defeated),
            ],
            next_generation: 1,
        }
    }

    fn slot_mut(&mut self, kind: AssetKind) -> &mut Slot {
        match kind {
            AssetKind::Background => &mut self.background,
            AssetKind::Sprite(mode) => &mut self.sprites[sprite_index(mode)],
        }
    }

    fn slot(&self, kind: AssetKind) -> &Slot {
        match kind {
            AssetKind::Background => &self.background,
            AssetKind::Sprite(mode) => &self.sprites[sprite_index(mode)],
        }
    }

    fn request(&mut self, kind: AssetKind, source: AssetSource) -> LoadRequest {
        let generation = self.next_generation;
        self.next_generation += 1;
        let slot = self.slot_mut(kind);
        slot.source = source.clone();
        slot.generation = generation;
        slot.state = SlotState::Pending;
        LoadRequest {
            ticket: LoadTicket { kind, generation },
            source,
        }
    }

    /// Requests for every slot using the current sources.
    pub fn request_all(&mut self) -> Vec<LoadRequest> {
        let background = self.background.source.clone();
        let mut requests = vec![self.request_background(background)];
        let sprites = SpriteSources {
            resting: self.sprites[0].source.clone(),
            flapping: self.sprites[1].source.clone(),
            defeated: self.sprites[2].source.clone(),
        };
        requests.extend(self.request_sprites(sprites));
        requests
    }

    pub fn request_background(&mut self, source: AssetSource) -> LoadRequest {
        self.request(AssetKind::Background, source)
    }

    pub fn request_sprites(&mut self, sources: SpriteSources) -> Vec<LoadRequest> {
        VisualMode::ALL
            .iter()
            .map(|&mode| self.request(AssetKind::Sprite(mode), sources.get(mode).clone()))
            .collect()
    }

    /// Record a finished load. A failed custom background falls back to the
    /// built-in one, returned as a follow-up request. A failed sprite
    /// leaves the gate closed until a later request succeeds.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Image, AssetError>,
    ) -> Option<LoadRequest> {
        if self.slot(ticket.kind).generation != ticket.generation {
            tracing::debug!(asset = ticket.kind.name(), "dropping stale asset load");
            return None;
        }

        match result {
            Ok(image) => {
                tracing::info!(
                    asset = ticket.kind.name(),
                    source = %self.slot(ticket.kind).source.describe(),
                    width = image.width,
                    height = image.height,
                    "asset loaded"
                );
                self.slot_mut(ticket.kind).state = SlotState::Ready(image);
                None
            }
            Err(err) => {
                tracing::warn!(
                    asset = ticket.kind.name(),
                    source = %self.slot(ticket.kind).source.describe(),
                    error = %err,
                    "asset failed to load"
                );
                let default_background = AssetSource::Builtin(BuiltinAsset::Background);
                if ticket.kind == AssetKind::Background
                    && self.background.source != default_background
                {
                    return Some(self.request_background(default_background));
                }
                self.slot_mut(ticket.kind).state = SlotState::Failed(err.to_string());
                None
            }
        }
    }

    /// Both the background and all sprite variants are decoded.
    pub fn is_ready(&self) -> bool {
        self.background.image().is_some() && self.sprites.iter().all(|s| s.image().is_some())
    }

    pub fn background(&self) -> Option<&Image> {
        self.background.image()
    }

    pub fn sprite(&self, mode: VisualMode) -> Option<&Image> {
        self.sprites[sprite_index(mode)].image()
    }

    pub fn source(&self, kind: AssetKind) -> &AssetSource {
        &self.slot(kind).source
    }

    /// Names of slots not yet ready, for the waiting notice.
    pub fn waiting_on(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.background.image().is_none() {
            names.push(AssetKind::Background.name());
        }
        for mode in VisualMode::ALL {
            if self.sprite(mode).is_none() {
                names.push(AssetKind::Sprite(mode).name());
            }
        }
        names
    }

    /// Any slot ended in a failure with no load outstanding.
    pub fn has_failures(&self) -> bool {
        std::iter::once(&self.background)
            .chain(self.sprites.iter())
            .any(|s| matches!(s.state, SlotState::Failed(_)))
    }
}
