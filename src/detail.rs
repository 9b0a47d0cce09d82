use serde::{Deserialize, Serialize};

use crate::state::{
    ChainLink, EntityDetail, EvolutionChain, LocalizedText, NamedResource, SpeciesDetail,
    SpriteRefs,
};

const ENGLISH: &str = "en";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetailStatus {
    Loading,
    Ready,
    Failed(String),
}

/// How a flattened evolution step attaches to the step before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepLink {
    Root,
    /// Only child of its parent.
    Inline,
    /// One of several siblings, `index` of `count`.
    Branch { index: usize, count: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStep {
    pub species: NamedResource,
    pub depth: usize,
    pub link: StepLink,
}

/// Pre-order flattening: every node once, parents before children, siblings in order.
pub fn flatten_chain(root: &ChainLink) -> Vec<EvolutionStep> {
    let mut steps = Vec::new();
    push_steps(root, 0, StepLink::Root, &mut steps);
    steps
}

fn push_steps(link: &ChainLink, depth: usize, kind: StepLink, out: &mut Vec<EvolutionStep>) {
    out.push(EvolutionStep {
        species: link.species.clone(),
        depth,
        link: kind,
    });
    let count = link.evolves_to.len();
    for (index, child) in link.evolves_to.iter().enumerate() {
        let kind = if count == 1 {
            StepLink::Inline
        } else {
            StepLink::Branch { index, count }
        };
        push_steps(child, depth + 1, kind, out);
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Newest English entry wins; entries are ordered oldest game first.
pub fn english_flavor_text(entries: &[LocalizedText]) -> Option<String> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.language == ENGLISH)
        .map(|entry| collapse_whitespace(&entry.text))
}

pub fn english_genus(genera: &[LocalizedText]) -> Option<String> {
    genera
        .iter()
        .find(|entry| entry.language == ENGLISH)
        .map(|entry| entry.text.clone())
}

pub fn preferred_sprite(sprites: &SpriteRefs) -> Option<&str> {
    sprites
        .official_artwork
        .as_deref()
        .or(sprites.front_default.as_deref())
        .or(sprites.home.as_deref())
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_height(decimetres: u32) -> String {
    format!("{:.1} m", decimetres as f32 / 10.0)
}

pub fn format_weight(hectograms: u32) -> String {
    format!("{:.1} kg", hectograms as f32 / 10.0)
}

/// One opened detail view. Results are applied only while `generation`
/// matches the one the reducer issued for this open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailSession {
    pub generation: u64,
    pub name: String,
    pub status: DetailStatus,
    pub detail: Option<EntityDetail>,
    pub species: Option<SpeciesDetail>,
    pub evolution: Option<EvolutionChain>,
    pub species_loading: bool,
    pub evolution_loading: bool,
    pub evolution_selected: usize,
}

impl DetailSession {
    pub fn new(name: &str, generation: u64) -> Self {
        Self {
            generation,
            name: name.to_lowercase(),
            status: DetailStatus::Loading,
            detail: None,
            species: None,
            evolution: None,
            species_loading: false,
            evolution_loading: false,
            evolution_selected: 0,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Stores the entity record and returns the species URL to fetch next.
    pub fn apply_detail(&mut self, detail: Option<EntityDetail>) -> Option<String> {
        let Some(detail) = detail else {
            self.status = DetailStatus::Failed(format!(
                "Could not load details for {}.",
                self.name
            ));
            return None;
        };
        let next = detail.species.as_ref().map(|species| species.url.clone());
        self.detail = Some(detail);
        self.status = DetailStatus::Ready;
        self.species_loading = next.is_some();
        next
    }

    /// Stores the species record and returns the evolution chain URL to fetch next.
    pub fn apply_species(&mut self, species: Option<SpeciesDetail>) -> Option<String> {
        self.species_loading = false;
        let next = species
            .as_ref()
            .and_then(|species| species.evolution_chain_url.clone());
        self.species = species;
        self.evolution_loading = next.is_some();
        next
    }

    pub fn apply_evolution(&mut self, chain: Option<EvolutionChain>) {
        self.evolution_loading = false;
        self.evolution = chain;
        self.evolution_selected = self
            .evolution_steps()
            .iter()
            .position(|step| step.species.name == self.name)
            .unwrap_or(0);
    }

    pub fn evolution_steps(&self) -> Vec<EvolutionStep> {
        self.evolution
            .as_ref()
            .map(|chain| flatten_chain(&chain.chain))
            .unwrap_or_default()
    }

    pub fn select_evolution(&mut self, index: usize) -> bool {
        let len = self.evolution_steps().len();
        if len == 0 {
            return false;
        }
        let index = index.min(len - 1);
        if index == self.evolution_selected {
            return false;
        }
        self.evolution_selected = index;
        true
    }

    pub fn selected_evolution(&self) -> Option<EvolutionStep> {
        self.evolution_steps().into_iter().nth(self.evolution_selected)
    }

    pub fn flavor_text(&self) -> Option<String> {
        self.species
            .as_ref()
            .and_then(|species| english_flavor_text(&species.flavor_text_entries))
    }

    pub fn genus(&self) -> Option<String> {
        self.species
            .as_ref()
            .and_then(|species| english_genus(&species.genera))
    }

    pub fn sprite_url(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|detail| preferred_sprite(&detail.sprites))
    }
}
