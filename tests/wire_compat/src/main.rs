fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use gamebox_protocol::{
        AddToLibraryRequest, CatalogGame, ErrorResponse, LibraryEntry, LibraryStatus,
        LoginRequest, LoginResponse, MessageResponse, UpdateStatusRequest, UserProfile,
    };

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture captured from the backend.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Decodes a fixture, re-encodes it, and requires the same JSON back.
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  backend: {fixture}\n  client:  {reserialized}"
        );
        parsed
    }

    // --- Request bodies ---

    #[test]
    fn fixture_add_request() {
        let req: AddToLibraryRequest = roundtrip_test("add_request.json");
        assert_eq!(req.jogo_id.as_str(), "12");
        assert_eq!(req.status, LibraryStatus::Playing);
    }

    #[test]
    fn fixture_status_request() {
        let req: UpdateStatusRequest = roundtrip_test("status_request.json");
        assert_eq!(req.status, LibraryStatus::Completed);
    }

    #[test]
    fn fixture_login_request() {
        let req: LoginRequest = roundtrip_test("login_request.json");
        assert_eq!(req.email, "ana@example.com");
    }

    // --- Responses ---

    #[test]
    fn fixture_message_response() {
        let resp: MessageResponse = roundtrip_test("message_response.json");
        assert!(resp.mensagem.contains("Hollow Knight"));
    }

    #[test]
    fn fixture_error_response() {
        let resp: ErrorResponse = roundtrip_test("error_response.json");
        assert_eq!(resp.message(), Some("Jogo não encontrado na sua biblioteca"));
    }

    #[test]
    fn fixture_login_response() {
        let resp: LoginResponse = roundtrip_test("login_response.json");
        assert!(resp.success);
        let user = resp.user.expect("user present");
        assert_eq!((user.id, user.username.as_str()), (4, "ana"));
    }

    #[test]
    fn fixture_login_failure() {
        let resp: LoginResponse = roundtrip_test("login_failure.json");
        assert!(!resp.success);
        assert!(resp.user.is_none());

        // The same body read through the generic error decoder.
        let err: ErrorResponse =
            serde_json::from_value(load_fixture("login_failure.json")).unwrap();
        assert_eq!(err.message(), Some("Email ou senha incorretos"));
    }

    #[test]
    fn fixture_library_list() {
        let entries: Vec<LibraryEntry> = roundtrip_test("library_list.json");
        assert_eq!(entries.len(), 3);

        let hk = &entries[0];
        assert_eq!(hk.game_id.as_str(), "12");
        assert_eq!(hk.status, LibraryStatus::Playing);
        assert_eq!(hk.release_year, Some(2017));
        assert!(hk.added_at.is_some());

        let ow = &entries[1];
        assert_eq!(ow.status, LibraryStatus::Queued);
        assert!(ow.added_at.is_none());
        assert!(ow.platforms.is_none());

        assert_eq!(entries[2].status, LibraryStatus::Abandoned);
        assert_eq!(entries[2].image_url.as_deref(), Some(""));
    }

    #[test]
    fn fixture_catalog_list() {
        let games: Vec<CatalogGame> = roundtrip_test("catalog_list.json");
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "Hollow Knight");
        assert_eq!(games[0].rating, Some(4.5));
        assert!(games[1].rating.is_none());
        assert!(games[1].release_year.is_none());
    }

    #[test]
    fn fixture_user_profile() {
        let profile: UserProfile = roundtrip_test("user_profile.json");
        assert_eq!(profile.id, Some(4));
        assert!(profile.username.is_none());
        assert_eq!(profile.display_name(), Some("ana"));
    }

    #[test]
    fn every_status_token_decodes() {
        for status in LibraryStatus::ALL {
            let value = serde_json::json!(status.as_wire());
            let decoded: LibraryStatus = serde_json::from_value(value).unwrap();
            assert_eq!(decoded, status);
        }
    }
}
