//! Assistant orchestration: one question-answer turn per call.
//!
//! Each turn rebuilds the system prompt around a fresh digest of the
//! current surveillance data, so the assistant always answers against
//! the same snapshot the dashboard is rendering. The user's question is
//! forwarded unmodified; session history travels as plain messages.

use screwworm_map_pipeline::digest::data_digest;
use screwworm_map_surveillance_models::Observation;

use crate::providers::{LlmProvider, Message};
use crate::AskOutcome;

/// Maximum number of history messages (user + assistant) sent per turn.
/// Older turns are dropped from the request, not from the stored session.
pub const MAX_HISTORY_MESSAGES: usize = 20;

/// Builds the assistant's system prompt around the current data digest.
#[must_use]
pub fn build_system_prompt(digest: &str) -> String {
    format!(
        "Eres el asistente epidemiológico especializado en gusano barrenador del ganado \
         (Cochliomyia hominivorax) de SENASICA para el estado de Yucatán, México.\n\
         \n\
         DATOS ACTUALES DE VIGILANCIA:\n\
         =============================\n\
         {digest}\n\
         \n\
         TU FUNCIÓN:\n\
         - Analizar los datos locales de vigilancia y responder con números concretos.\n\
         - Comparar la situación local con el panorama internacional cuando sea relevante.\n\
         - Proponer recomendaciones de control priorizadas y basadas en evidencia.\n\
         \n\
         CONOCIMIENTO TÉCNICO:\n\
         - El gusano barrenador es la larva de la mosca Cochliomyia hominivorax; infesta \
         heridas de animales de sangre caliente.\n\
         - El control se basa en inspección de heridas, tratamiento larvicida y liberación \
         de moscas estériles.\n\
         - La movilización de ganado sin inspección es el principal vector de propagación \
         entre municipios.\n\
         \n\
         FORMATO DE RESPUESTA:\n\
         - Responde en español, en markdown claro.\n\
         - Cita siempre las cifras de los datos actuales; nunca inventes estadísticas.\n\
         - Si la pregunta queda fuera de los datos disponibles, dilo explícitamente."
    )
}

/// Runs one assistant turn: digest the data, replay the session history,
/// append the question, and ask the provider.
///
/// The returned [`AskOutcome`] always carries the message list including
/// the new question, so the caller can persist the session even when the
/// provider call failed.
pub async fn ask(
    provider: &dyn LlmProvider,
    history: &[Message],
    rows: &[Observation],
    question: &str,
) -> AskOutcome {
    let digest = data_digest(rows);
    let system_prompt = build_system_prompt(&digest);

    let start = history.len().saturating_sub(MAX_HISTORY_MESSAGES);
    let mut messages: Vec<Message> = history[start..].to_vec();
    messages.push(Message::user(question));

    match provider.chat(&system_prompt, &messages).await {
        Ok(answer) => {
            messages.push(Message::assistant(answer.clone()));
            AskOutcome {
                messages,
                result: Ok(answer),
            }
        }
        Err(e) => {
            log::error!("Assistant turn failed: {e}");
            AskOutcome {
                messages,
                result: Err(e),
            }
        }
    }
}
