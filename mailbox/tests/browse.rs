use std::{fs, path::Path};

use chrono::NaiveDate;
use mailbox::{
    calendar::{CalendarPage, CalendarView},
    index::{fs::FsShardSource, load::IndexLoader},
    list::cache::FolderCache,
    permalink::Permalink,
    session::{Redirect, Session},
    storage::{JsonFileStore, KvStore, MemoryStore},
    Mailbox, MailboxConfig,
};
use tempfile::tempdir;

const PART_1: &str = r#"{
    "mailbox": "bailey-s",
    "total_parts": 3,
    "folders": [
        {"name": "bailey-s/Inbox", "count": 3},
        {"name": "bailey-s/Sent Items", "count": 1},
        {"name": "bailey-s/Projects", "count": 1}
    ],
    "emails": [
        {
            "id": "1",
            "folder": "bailey-s/Inbox",
            "subject": "Gas prices",
            "from": {"name": "Kenneth Lay", "email": "kenneth.lay@enron.com"},
            "to": [{"name": "Susan Bailey", "email": "susan.bailey@enron.com"}],
            "date": "2001-05-14T09:00:00",
            "body": "<p>Gas prices are up.</p><script>alert(1)</script>"
        },
        {
            "id": "2",
            "folder": "bailey-s/Sent Items",
            "subject": "Re: Gas prices",
            "from": {"email": "susan.bailey@enron.com"},
            "date": "2001-05-14T10:00:00"
        }
    ],
    "events": [
        {"start": "2001-06-15T14:00", "end": "2001-06-15T15:00", "subject": "Budget review"}
    ]
}"#;

const PART_2: &str = r#"{
    "emails": [
        {
            "id": "3",
            "folder": "bailey-s/Inbox",
            "subject": "Power crisis",
            "from": {"name": "Jeff Dasovich"},
            "date": "2001-05-15T08:30:00",
            "attachments": [{"filename": "report.pdf", "path": "attachments/3/report.pdf"}],
            "has_attachments": true
        },
        {
            "id": "4",
            "folder": "bailey-s/Inbox",
            "subject": "Lunch",
            "date": "not a date"
        },
        {
            "id": "5",
            "folder": "bailey-s/Projects",
            "subject": null,
            "to": null,
            "date": 989876543000
        }
    ],
    "events": [
        {"start": "2001-06-15T09:00", "subject": "Standup"}
    ]
}"#;

/// Writes the parts of the `bailey-s` mailbox under the given root.
/// Part 3 is missing on purpose.
fn write_parts(root: &Path) {
    let dir = root.join("mail").join("bailey-s");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.json"), PART_1).unwrap();
    fs::write(dir.join("index-part-2.json"), PART_2).unwrap();
}

async fn load(config: MailboxConfig) -> Mailbox {
    let dir = tempdir().unwrap();
    write_parts(dir.path());
    let loader = IndexLoader::new(FsShardSource::new(dir.path()));
    Mailbox::load(&loader, "bailey-s", config).await.unwrap()
}

fn ids(mailbox: &Mailbox, state: &mailbox::AppState, cache: &mut FolderCache) -> Vec<String> {
    mailbox
        .list(state, cache)
        .emails
        .iter()
        .map(|email| email.id.clone())
        .collect()
}

#[test_log::test(tokio::test)]
async fn browse_mailbox() {
    let mailbox = load(MailboxConfig::default()).await;
    assert_eq!(mailbox.title(), "WebMail: Bailey S");
    assert_eq!(mailbox.emails().len(), 5);
    assert_eq!(mailbox.events().len(), 2);

    let loose = mailbox.emails().find("5").unwrap();
    assert_eq!(loose.subject_or_placeholder(), "(No Subject)");
    assert_eq!(
        loose.date().map(|date| date.timestamp_millis()),
        Some(989876543000)
    );

    let mut cache = FolderCache::new();
    let mut state = mailbox.resolve(&Permalink::default());
    assert_eq!(state.folder.as_deref(), Some("bailey-s/Inbox"));

    // most recent first, unknown dates last
    assert_eq!(ids(&mailbox, &state, &mut cache), vec!["3", "1", "4"]);

    state.search("GAS");
    let page = mailbox.list(&state, &mut cache);
    assert_eq!(page.total, 1);
    assert_eq!(
        page.search_summary().as_deref(),
        Some("1 result found for \"GAS\"")
    );

    state.search("");
    state.sort_by("subject asc".parse().unwrap());
    assert_eq!(ids(&mailbox, &state, &mut cache), vec!["1", "4", "3"]);

    let listing = mailbox.folder_listing(&state);
    let special: Vec<_> = listing.special.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(special, vec!["bailey-s/Inbox", "bailey-s/Sent Items"]);
    assert_eq!(listing.regular.len(), 1);
    assert_eq!(listing.regular[0].display_name(), "Projects");
}

#[test_log::test(tokio::test)]
async fn open_and_flag_emails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mailbox = load(MailboxConfig::default()).await;
    let mut cache = FolderCache::new();

    let mut state = mailbox.resolve(&Permalink::default());
    let mut flags = mailbox.flags(JsonFileStore::open(&path).unwrap());

    state.select_next(3);
    let page = mailbox.list(&state, &mut cache);
    let now = NaiveDate::from_ymd_opt(2001, 5, 15)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap();
    let rows = page.rows(&flags, now);
    let selected = &rows[state.selected.unwrap()];
    assert_eq!(selected.id, "3");
    assert_eq!(selected.from, "Jeff Dasovich");
    assert_eq!(selected.date, "Today 8:30 AM");
    assert!(selected.has_attachments);
    assert!(!selected.read);

    state.open_email(&selected.id);
    let detail = mailbox.open(&state, "3", &mut flags).unwrap();
    assert_eq!(detail.to.visible_line(), "Unknown");
    assert_eq!(detail.attachments.visible[0].icon, "[PDF]");
    assert_eq!(
        detail.attachments.visible[0].href,
        "/mail/bailey-s/attachments/3/report.pdf"
    );
    assert!(flags.is_read("3"));
    assert!(flags.toggle_star("3"));

    let detail = mailbox.open(&state, "1", &mut flags).unwrap();
    assert_eq!(detail.body, "<p>Gas prices are up.</p>");
    assert_eq!(detail.date, "May 14, 2001 | 9:00 AM");

    assert!(mailbox.open(&state, "404", &mut flags).is_err());

    let flags = mailbox.flags(JsonFileStore::open(&path).unwrap());
    assert!(flags.is_read("1"));
    assert!(flags.is_read("3"));
    assert!(flags.is_starred("3"));
    assert!(!flags.is_read("4"));

    let rows = mailbox.list(&state, &mut cache).rows(&flags, now);
    assert!(rows.iter().any(|row| row.id == "3" && row.read && row.starred));
}

#[test_log::test(tokio::test)]
async fn resolve_permalinks() {
    let mailbox = load(MailboxConfig::default()).await;

    let link = Permalink::parse("mailbox=bailey-s&folder=bailey-s%2FSent%20Items&email=2");
    let state = mailbox.resolve(&link);
    assert_eq!(state.folder.as_deref(), Some("bailey-s/Sent Items"));
    assert_eq!(state.open_email.as_deref(), Some("2"));
    assert_eq!(Permalink::from_state(&state), link);

    let link = Permalink::parse("mailbox=bailey-s&folder=nowhere&email=404");
    let state = mailbox.resolve(&link);
    assert_eq!(state.folder.as_deref(), Some("bailey-s/Inbox"));
    assert_eq!(state.open_email, None);
}

#[test_log::test(tokio::test)]
async fn browse_calendar() {
    let config = MailboxConfig {
        calendar_year: Some(2001),
        ..Default::default()
    };
    let mailbox = load(config).await;
    let mut calendar = mailbox.calendar(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    assert_eq!(calendar.title(), "June 2001");

    let CalendarPage::Month(grid) = calendar.page(mailbox.events()) else {
        panic!("expected month view");
    };
    let june_15 = grid
        .iter()
        .flatten()
        .flatten()
        .find(|cell| cell.date.day == 15)
        .unwrap();
    assert_eq!(june_15.events.len(), 2);

    calendar.select(june_15.date);
    assert_eq!(calendar.view, CalendarView::Day);
    let CalendarPage::Day(slots) = calendar.page(mailbox.events()) else {
        panic!("expected day view");
    };
    let lines: Vec<_> = slots.iter().flat_map(|slot| slot.lines()).collect();
    assert_eq!(
        lines,
        vec!["9:00 AM: Standup", "2:00 PM - 3:00 PM: Budget review"]
    );

    calendar.navigate(1);
    assert_eq!(
        calendar.page(mailbox.events()).empty_message(),
        Some("No events for this day.")
    );

    calendar.set_view(CalendarView::Schedule);
    calendar.navigate(-1);
    assert_eq!(calendar.title(), "May 2001");
    assert_eq!(
        calendar.page(mailbox.events()).empty_message(),
        Some("No events scheduled for this month.")
    );
}

#[test_log::test(tokio::test)]
async fn missing_mailbox() {
    let dir = tempdir().unwrap();
    let loader = IndexLoader::new(FsShardSource::new(dir.path()));
    let err = Mailbox::load(&loader, "nobody", MailboxConfig::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("nobody"));

    let mut store = MemoryStore::new();
    let mut session = Session::new(&mut store, "");
    assert_eq!(session.login("nobody"), Redirect::Landing);
    session.logout();
    assert_eq!(store.get("current_mailbox").unwrap(), None);
}
