//! Tutorial content shown to first-time users.

use serde::Serialize;

/// One step of the how-to walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    pub id: u8,
    pub emoji: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TUTORIAL_STEPS: [TutorialStep; 3] = [
    TutorialStep {
        id: 1,
        emoji: "✏️",
        title: "Ingresa tu nombre",
        description: "Escribe tu nombre y aparecerá en tu Catrín o Catrina personalizada",
    },
    TutorialStep {
        id: 2,
        emoji: "🎩👗",
        title: "Elige tu personaje",
        description: "Selecciona si quieres un Catrín o una Catrina. Cada uno tiene su estilo único",
    },
    TutorialStep {
        id: 3,
        emoji: "📤",
        title: "Comparte tu creación",
        description: "Descarga tu personaje o compártelo en redes sociales para celebrar el Día de Muertos",
    },
];
