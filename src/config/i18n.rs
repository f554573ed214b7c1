//! Internationalization (i18n) module for user-facing console messages.

/// UI messages structure
#[derive(Debug, Clone)]
pub struct Messages {
    pub banner: &'static str,
    pub prompt: &'static str,
    pub reply_label: &'static str,
    pub exit_command: &'static str,
    pub farewell: &'static str,
    pub missing_api_key: &'static str,

    // Diagnostics printed on each failure branch.
    pub auth_diagnostic: &'static str,
    pub connection_diagnostic: &'static str,
    pub rate_limit_diagnostic: &'static str,
    pub attempt: &'static str,
    pub waiting: &'static str,
    pub seconds: &'static str,
    pub api_diagnostic: &'static str,
    pub unknown_diagnostic: &'static str,

    // Fixed replies handed back in place of model text.
    pub auth_error: &'static str,
    pub connection_error: &'static str,
    pub api_error: &'static str,
    pub unknown_error: &'static str,
    pub retries_exhausted: &'static str,
}

/// Spanish messages
pub static MESSAGES_ES: Messages = Messages {
    banner: "🤖 Asistente de IA - Escribe 'salir' para terminar.",
    prompt: "Tú: ",
    reply_label: "🤖 Asistente: ",
    exit_command: "salir",
    farewell: "👋 ¡Hasta luego!",
    missing_api_key: "⚠️ ERROR: No se encontró la API Key. Verifica el archivo .env y asegúrate de haberla agregado correctamente.",
    auth_diagnostic: "❌ ERROR: Clave de API inválida. Verifica tu .env.",
    connection_diagnostic: "❌ ERROR: No se pudo conectar con OpenAI. Verifica tu conexión a Internet.",
    rate_limit_diagnostic: "⏳ ERROR: Superaste el límite de uso.",
    attempt: "Intento",
    waiting: "Esperando",
    seconds: "segundos",
    api_diagnostic: "⚠️ ERROR inesperado de OpenAI:",
    unknown_diagnostic: "⚠️ ERROR desconocido:",
    auth_error: "Error de autenticación con la API.",
    connection_error: "Error de conexión con la API.",
    api_error: "Hubo un problema con la API.",
    unknown_error: "Ocurrió un error inesperado.",
    retries_exhausted: "🚫 No se pudo obtener una respuesta después de varios intentos.",
};

/// English messages
pub static MESSAGES_EN: Messages = Messages {
    banner: "🤖 AI Assistant - Type 'exit' to quit.",
    prompt: "You: ",
    reply_label: "🤖 Assistant: ",
    exit_command: "exit",
    farewell: "👋 Goodbye!",
    missing_api_key: "⚠️ ERROR: API key not found. Check your .env file and make sure it is set.",
    auth_diagnostic: "❌ ERROR: Invalid API key. Check your .env.",
    connection_diagnostic: "❌ ERROR: Could not connect to OpenAI. Check your Internet connection.",
    rate_limit_diagnostic: "⏳ ERROR: Rate limit exceeded.",
    attempt: "Attempt",
    waiting: "Waiting",
    seconds: "seconds",
    api_diagnostic: "⚠️ Unexpected OpenAI ERROR:",
    unknown_diagnostic: "⚠️ Unknown ERROR:",
    auth_error: "Authentication error with the API.",
    connection_error: "Connection error with the API.",
    api_error: "There was a problem with the API.",
    unknown_error: "An unexpected error occurred.",
    retries_exhausted: "🚫 Could not get a response after several attempts.",
};

/// Get UI messages by language.
///
/// # Arguments
/// * `lang` - Language code, "es" for Spanish, "en" for English.
///
/// # Returns
/// Reference to Messages struct. Unknown codes get Spanish.
pub fn get_messages(lang: &str) -> &'static Messages {
    match lang {
        "en" => &MESSAGES_EN,
        _ => &MESSAGES_ES,
    }
}

impl Messages {
    /// Diagnostic line for a rate-limited attempt.
    ///
    /// `delay_secs` is `None` when no wait follows (the last attempt).
    pub fn rate_limit_notice(
        &self,
        attempt: u32,
        max_attempts: u32,
        delay_secs: Option<u64>,
    ) -> String {
        let mut line = format!(
            "{} {} {}/{}.",
            self.rate_limit_diagnostic, self.attempt, attempt, max_attempts
        );
        if let Some(secs) = delay_secs {
            line.push_str(&format!(" {} {} {}...", self.waiting, secs, self.seconds));
        }
        line
    }

    /// Whether a line typed at the prompt asks to leave the session.
    ///
    /// `salir` is accepted in every language, next to the localized word.
    pub fn is_exit_command(&self, input: &str) -> bool {
        let word = input.trim().to_lowercase();
        word == MESSAGES_ES.exit_command || word == self.exit_command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_messages() {
        let es = get_messages("es");
        assert_eq!(es.prompt, "Tú: ");
        assert_eq!(es.reply_label, "🤖 Asistente: ");

        let en = get_messages("en");
        assert_eq!(en.prompt, "You: ");

        assert_eq!(get_messages("fr").exit_command, "salir");
    }

    #[test]
    fn test_rate_limit_notice() {
        let es = get_messages("es");
        assert_eq!(
            es.rate_limit_notice(1, 3, Some(5)),
            "⏳ ERROR: Superaste el límite de uso. Intento 1/3. Esperando 5 segundos..."
        );
        assert_eq!(
            es.rate_limit_notice(3, 3, None),
            "⏳ ERROR: Superaste el límite de uso. Intento 3/3."
        );
    }

    #[test]
    fn test_is_exit_command() {
        let es = get_messages("es");
        assert!(es.is_exit_command("salir"));
        assert!(es.is_exit_command("SALIR"));
        assert!(es.is_exit_command("Salir\n"));
        assert!(!es.is_exit_command("salir ahora"));
        assert!(!es.is_exit_command(""));
        assert!(!es.is_exit_command("exit"));

        let en = get_messages("en");
        assert!(en.is_exit_command("salir"));
        assert!(en.is_exit_command("SALIR"));
        assert!(en.is_exit_command("Exit"));
        assert!(!en.is_exit_command("quit"));
    }
}
