mod common;

use common::{Call, FakeService, local_track, songs};
use spotlist::{
    cli::{add_songs, read_song_queries},
    spotify::SpotifyError,
    types::SongOutcome,
    utils::track_uri,
};

fn outcomes(summary: &spotlist::types::AddSongsSummary) -> Vec<SongOutcome> {
    summary.reports.iter().map(|r| r.outcome.clone()).collect()
}

#[tokio::test]
async fn test_repeated_query_is_added_once() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &["a"])
        .with_song("Hey Jude", "b");

    let summary = add_songs(&service, "Road Trip", &songs(&["Hey Jude", "Hey Jude"]))
        .await
        .unwrap();

    assert_eq!(
        outcomes(&summary),
        vec![SongOutcome::Added, SongOutcome::Skipped]
    );
    assert_eq!(summary.added_uris, vec![track_uri("b")]);

    let adds: Vec<Call> = service
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::AddTracks(..)))
        .collect();
    assert_eq!(
        adds,
        vec![Call::AddTracks("pl1".to_string(), vec![track_uri("b")])]
    );
}

#[tokio::test]
async fn test_tracks_already_in_playlist_are_skipped() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &["a", "b"])
        .with_song("Song A", "a")
        .with_song("Song C", "c");

    let summary = add_songs(&service, "Road Trip", &songs(&["Song A", "Song C"]))
        .await
        .unwrap();

    assert_eq!(
        outcomes(&summary),
        vec![SongOutcome::Skipped, SongOutcome::Added]
    );
    assert_eq!(service.track_ids("pl1"), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_unknown_songs_are_reported_not_found() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &[])
        .with_song("Known", "k")
        .with_search_result("Local only", local_track("Local only"));

    let summary = add_songs(
        &service,
        "Road Trip",
        &songs(&["Nothing matches this", "Known", "Local only"]),
    )
    .await
    .unwrap();

    assert_eq!(
        outcomes(&summary),
        vec![
            SongOutcome::NotFound,
            SongOutcome::Added,
            SongOutcome::NotFound
        ]
    );
    assert_eq!(summary.count(&SongOutcome::NotFound), 2);
    assert_eq!(summary.added_uris, vec![track_uri("k")]);
}

#[tokio::test]
async fn test_empty_input_searches_nothing() {
    let service = FakeService::new("alice").with_playlist("pl1", "Road Trip", &["a"]);

    let summary = add_songs(&service, "Road Trip", &[]).await.unwrap();

    assert!(summary.reports.is_empty());
    assert!(summary.added_uris.is_empty());
    assert_eq!(
        service.calls(),
        vec![
            Call::CurrentUser,
            Call::UserPlaylists("alice".to_string()),
            Call::PlaylistTracks("pl1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_blank_lines_are_not_searched() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &[])
        .with_song("Hey Jude", "b");

    let summary = add_songs(&service, "Road Trip", &songs(&["", "   ", "  Hey Jude  "]))
        .await
        .unwrap();

    assert_eq!(service.searches(), vec!["Hey Jude"]);
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].query, "Hey Jude");
}

#[tokio::test]
async fn test_missing_playlist_stops_before_track_lookup() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &[])
        .with_song("Hey Jude", "b");

    let err = add_songs(&service, "road trip", &songs(&["Hey Jude"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SpotifyError::PlaylistNotFound(ref name) if name == "road trip"));
    assert!(!err.is_fatal());
    assert_eq!(
        service.calls(),
        vec![Call::CurrentUser, Call::UserPlaylists("alice".to_string())]
    );
}

#[tokio::test]
async fn test_running_twice_adds_each_track_once() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &["a"])
        .with_song("One", "b")
        .with_song("Two", "c")
        .with_song("Again", "a");
    let input = songs(&["One", "Two", "Again", "One"]);

    let first = add_songs(&service, "Road Trip", &input).await.unwrap();
    let second = add_songs(&service, "Road Trip", &input).await.unwrap();

    assert_eq!(first.added_uris.len(), 2);
    assert!(second.added_uris.is_empty());
    assert_eq!(second.count(&SongOutcome::Skipped), 4);
    assert_eq!(service.track_ids("pl1"), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_failed_search_does_not_stop_other_lines() {
    let service = FakeService::new("alice")
        .with_playlist("pl1", "Road Trip", &[])
        .with_failing_query("Broken")
        .with_song("Fine", "f");

    let summary = add_songs(&service, "Road Trip", &songs(&["Broken", "Fine"]))
        .await
        .unwrap();

    assert!(matches!(summary.reports[0].outcome, SongOutcome::Failed(_)));
    assert_eq!(summary.reports[1].outcome, SongOutcome::Added);
    assert_eq!(service.track_ids("pl1"), vec!["f"]);
}

#[tokio::test]
async fn test_read_song_queries_from_file() {
    let path = std::env::temp_dir().join(format!("spotlist-songs-{}.txt", std::process::id()));
    std::fs::write(&path, "Hey Jude\n\n  Let It Be  \r\nYesterday").unwrap();

    let queries = read_song_queries(&path).await.unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(queries, vec!["Hey Jude", "Let It Be", "Yesterday"]);
}

#[tokio::test]
async fn test_read_song_queries_missing_file_is_fatal() {
    let path = std::env::temp_dir().join("spotlist-does-not-exist/songs.txt");

    let err = read_song_queries(&path).await.unwrap_err();

    assert!(matches!(err, SpotifyError::Io(_)));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("songs.txt"));
}
