use std::fs;
use event_depth::Error;
use event_depth::events::{render_event_slice, write_event_slices, EventWindow, SliceConfig, BACKGROUND, NEGATIVE_EVENT, POSITIVE_EVENT};
use event_depth::io::event_loader::load_event_windows;

fn window(events: &[(i64, i64, u8)]) -> EventWindow {
    let mut window = EventWindow::default();
    for &(x, y, p) in events {
        window.push(x, y, p);
    }
    window
}

#[test]
fn test_render_colors_by_polarity() {
    let events = window(&[(0, 0, 0), (3, 1, 1), (-1, 0, 1), (4, 0, 1), (0, 2, 1), (2, 0, 7)]);
    let image = render_event_slice(&events, 2, 4).unwrap();

    assert_eq!(image.dimensions(), (4, 2));
    assert_eq!(*image.get_pixel(0, 0), NEGATIVE_EVENT);
    assert_eq!(*image.get_pixel(3, 1), POSITIVE_EVENT);
    assert_eq!(*image.get_pixel(2, 0), BACKGROUND);
    assert_eq!(*image.get_pixel(1, 1), BACKGROUND);
}

#[test]
fn test_positive_events_win_shared_pixel() {
    let events = window(&[(1, 1, 1), (1, 1, 0), (2, 2, 0), (2, 2, 0)]);
    let image = render_event_slice(&events, 3, 3).unwrap();
    assert_eq!(*image.get_pixel(1, 1), POSITIVE_EVENT);
    assert_eq!(*image.get_pixel(2, 2), NEGATIVE_EVENT);
}

#[test]
fn test_render_rejects_bad_input() {
    let mut events = window(&[(0, 0, 0)]);
    events.polarity.push(1);
    assert!(matches!(render_event_slice(&events, 2, 2), Err(Error::InvalidInput(_))));
    assert!(matches!(render_event_slice(&EventWindow::default(), 0, 2), Err(Error::InvalidInput(_))));
}

#[test]
fn test_write_event_slices_with_stride() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("slices");
    let windows = (0..5).map(|i| window(&[(i, 0, 1)])).collect::<Vec<EventWindow>>();
    let config = SliceConfig{height: 4, width: 8, stride: 2};

    let count = write_event_slices(windows, &output_dir, &config).unwrap();

    assert_eq!(count, 5);
    let mut names = fs::read_dir(&output_dir).unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<String>>();
    names.sort();
    assert_eq!(names, vec!("000000.png", "000002.png", "000004.png"));

    let slice = image::open(output_dir.join("000002.png")).unwrap().into_rgb8();
    assert_eq!(*slice.get_pixel(2, 0), POSITIVE_EVENT);
}

#[test]
fn test_load_event_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.txt");
    fs::write(&path, "# t x y p\n1000 1 2 1\n20000 3 4 0\n\n51000 5 6 1\n160999 7 8 0\n").unwrap();

    let windows = load_event_windows(&path, 50.0).unwrap();

    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0], window(&[(1, 2, 1), (3, 4, 0)]));
    assert_eq!(windows[1], window(&[(5, 6, 1)]));
    assert!(windows[2].is_empty());
    assert_eq!(windows[3], window(&[(7, 8, 0)]));
}

#[test]
fn test_load_event_windows_rejects_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let unsorted = dir.path().join("unsorted.txt");
    fs::write(&unsorted, "2000 1 2 1\n1000 3 4 0\n").unwrap();
    assert!(matches!(load_event_windows(&unsorted, 50.0), Err(Error::InvalidInput(_))));

    let malformed = dir.path().join("malformed.txt");
    fs::write(&malformed, "2000 1 2\n").unwrap();
    assert!(matches!(load_event_windows(&malformed, 50.0), Err(Error::InvalidInput(_))));

    assert!(matches!(load_event_windows(&malformed, 0.0), Err(Error::InvalidInput(_))));
}
