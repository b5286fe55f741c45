//! Static track catalog

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: u32,
    pub title: &'static str,
    pub artist: &'static str,
    pub emoji: &'static str,
    pub duration_seconds: u32,
}

impl Track {
    pub fn duration(&self) -> f64 {
        self.duration_seconds as f64
    }
}

const BUILTIN_TRACKS: [Track; 6] = [
    Track { id: 1, title: "Midnight Drive", artist: "Neon Coast", emoji: "🌃", duration_seconds: 214 },
    Track { id: 2, title: "Paper Lanterns", artist: "Hana Ito", emoji: "🏮", duration_seconds: 187 },
    Track { id: 3, title: "Low Tide", artist: "The Harbour Lights", emoji: "🌊", duration_seconds: 243 },
    Track { id: 4, title: "Static Bloom", artist: "Vela", emoji: "🌸", duration_seconds: 198 },
    Track { id: 5, title: "Northbound", artist: "Atlas & Fern", emoji: "🧭", duration_seconds: 265 },
    Track { id: 6, title: "Coffee at Dawn", artist: "Lo Studio", emoji: "☕", duration_seconds: 172 },
];

/// Fixed, ordered list of tracks
#[derive(Clone, Debug)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_TRACKS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
