//! User-facing wording for transport failures.

use crate::error::ApiError;

pub const CONNECTION_FAILED: &str =
    "Impossible de se connecter au serveur. Vérifiez votre connexion internet.";
pub const MISSING_API_KEY: &str = "Clé API OpenAI non configurée. Contactez l'administrateur.";
pub const UNAUTHORIZED: &str = "Accès non autorisé. Veuillez vous reconnecter.";
pub const TOO_MANY_REQUESTS: &str = "Trop de requêtes. Veuillez patienter quelques instants.";
pub const SERVER_ERROR: &str = "Erreur serveur. Veuillez réessayer plus tard.";
pub const UNEXPECTED_ERROR: &str = "Une erreur inattendue s'est produite.";

/// Maps a transport error to the message shown to the user.
///
/// Rules are checked in order and the first match wins. HTTP status codes
/// count as a match for their numeric substring.
pub fn handle_error(error: &ApiError) -> String {
    let message = error.to_string();
    let status = error.status();
    let has_status = |code: u16| status == Some(code) || message.contains(&code.to_string());

    if matches!(error, ApiError::Network(_)) || message.contains("Failed to fetch") {
        CONNECTION_FAILED.to_string()
    } else if message.contains("OpenAI API key") {
        MISSING_API_KEY.to_string()
    } else if has_status(401) {
        UNAUTHORIZED.to_string()
    } else if has_status(429) {
        TOO_MANY_REQUESTS.to_string()
    } else if has_status(500) {
        SERVER_ERROR.to_string()
    } else if message.trim().is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_network_failure_maps_to_connection_message() {
        let err = ApiError::Network("error sending request".to_string());
        assert_eq!(handle_error(&err), CONNECTION_FAILED);
    }

    #[test]
    fn test_missing_key_wins_over_status() {
        let err = http(500, "OpenAI API key not configured");
        assert_eq!(handle_error(&err), MISSING_API_KEY);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(handle_error(&http(401, "HTTP error! status: 401")), UNAUTHORIZED);
        assert_eq!(handle_error(&http(429, "HTTP error! status: 429")), TOO_MANY_REQUESTS);
        assert_eq!(handle_error(&http(429, "Rate limit exceeded")), TOO_MANY_REQUESTS);
        assert_eq!(handle_error(&http(500, "Erreur lors de la génération du schéma")), SERVER_ERROR);
    }

    #[test]
    fn test_unmatched_message_passes_through() {
        let err = http(422, "La description est trop courte");
        assert_eq!(handle_error(&err), "La description est trop courte");

        let err = ApiError::Application("Quota épuisé".to_string());
        assert_eq!(handle_error(&err), "Quota épuisé");
    }

    #[test]
    fn test_empty_message_falls_back_to_generic() {
        let err = ApiError::Application(String::new());
        assert_eq!(handle_error(&err), UNEXPECTED_ERROR);
    }
}
