/// Display bucket for a water temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    Loading,
    Cold,
    Mild,
    Ideal,
    Warm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    pub band: MoodBand,
    pub label: &'static str,
    /// Palette name of the accent color.
    pub color: &'static str,
    pub glow: &'static str,
}

impl MoodBand {
    /// Bands are upper-exclusive: 14.0 is already mild, 22.0 already warm.
    pub fn for_temperature(value: Option<f64>) -> Self {
        match value {
            None => MoodBand::Loading,
            Some(v) if v < 14.0 => MoodBand::Cold,
            Some(v) if v < 18.0 => MoodBand::Mild,
            Some(v) if v < 22.0 => MoodBand::Ideal,
            Some(_) => MoodBand::Warm,
        }
    }

    pub fn mood(self) -> Mood {
        let (label, color, glow) = match self {
            MoodBand::Loading => (
                "Daten werden geladen",
                "slate",
                "rgba(148,163,184,0.35)",
            ),
            MoodBand::Cold => ("Frisch", "sky", "rgba(56,189,248,0.35)"),
            MoodBand::Mild => ("Klar & angenehm", "emerald", "rgba(16,185,129,0.35)"),
            MoodBand::Ideal => ("Perfekt", "amber", "rgba(251,191,36,0.35)"),
            MoodBand::Warm => ("Sommerfeeling", "rose", "rgba(244,114,182,0.35)"),
        };
        Mood {
            band: self,
            label,
            color,
            glow,
        }
    }
}

pub fn temperature_mood(value: Option<f64>) -> Mood {
    MoodBand::for_temperature(value).mood()
}
