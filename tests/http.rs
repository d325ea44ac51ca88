use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TaskStatus {
    task: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct DayView {
    date: String,
    tasks: Vec<TaskStatus>,
    percent: f64,
}

#[derive(Debug, Deserialize)]
struct TaskSummary {
    task: String,
    completed: usize,
    window: usize,
}

#[derive(Debug, Deserialize)]
struct ReportRow {
    date: String,
    task: String,
    done: bool,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("hair_care_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_hair_care_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("APP_REMINDERS", "off")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn today(client: &Client, base_url: &str) -> DayView {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn flag(day: &DayView, task: &str) -> bool {
    day.tasks
        .iter()
        .find(|status| status.task == task)
        .map(|status| status.done)
        .expect("missing task")
}

#[tokio::test]
async fn http_today_lists_every_task() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let day = today(&client, &server.base_url).await;
    assert_eq!(day.date.len(), 10);
    let names: Vec<_> = day.tasks.iter().map(|status| status.task.as_str()).collect();
    assert_eq!(
        names,
        vec!["Recur Tablet", "Minoxidil", "Water Intake", "Oiling", "Shampoo"]
    );
    assert!((0.0..=100.0).contains(&day.percent));
}

#[tokio::test]
async fn http_toggle_flips_task_for_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = today(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/toggle", server.base_url))
        .json(&serde_json::json!({ "task": "Shampoo" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let toggled: DayView = response.json().await.unwrap();
    assert_eq!(toggled.date, before.date);
    assert_eq!(flag(&toggled, "Shampoo"), !flag(&before, "Shampoo"));

    let after = today(&client, &server.base_url).await;
    assert_eq!(flag(&after, "Shampoo"), !flag(&before, "Shampoo"));
    let delta = if flag(&after, "Shampoo") { 20.0 } else { -20.0 };
    assert!((after.percent - (before.percent + delta)).abs() < 1e-9);
}

#[tokio::test]
async fn http_toggle_rejects_unknown_task() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/toggle", server.base_url))
        .json(&serde_json::json!({ "task": "Biotin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_reset_clears_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .post(format!("{}/api/toggle", server.base_url))
        .json(&serde_json::json!({ "task": "water_intake" }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/reset", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let day = today(&client, &server.base_url).await;
    assert_eq!(day.percent, 0.0);
    assert!(day.tasks.iter().all(|status| !status.done));
}

#[tokio::test]
async fn http_summary_and_days() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .post(format!("{}/api/toggle", server.base_url))
        .json(&serde_json::json!({ "task": "Oiling", "date": "2020-05-01" }))
        .send()
        .await
        .unwrap();

    let summary: Vec<TaskSummary> = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary.len(), 5);
    assert!(summary.iter().all(|entry| entry.window == 7 && entry.completed <= 7));
    assert_eq!(summary[0].task, "Recur Tablet");

    let only_today: Vec<DayView> = client
        .get(format!("{}/api/days", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let current = today(&client, &server.base_url).await;
    assert_eq!(only_today.len(), 1);
    assert_eq!(only_today[0].date, current.date);

    let ranged: Vec<DayView> = client
        .get(format!(
            "{}/api/days?start=2020-05-01&end=2020-05-31",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].date, "2020-05-01");
    assert!(flag(&ranged[0], "Oiling"));

    let history: Vec<DayView> = client
        .get(format!("{}/api/history", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(history.iter().any(|day| day.date == "2020-05-01"));
    assert!(history.iter().all(|day| day.date != current.date));
}

#[tokio::test]
async fn http_report_lists_rows() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let current = today(&client, &server.base_url).await;
    let rows: Vec<ReportRow> = client
        .get(format!("{}/api/report", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rows.len() % 5, 0);
    assert_eq!(
        rows.iter().filter(|row| row.date == current.date).count(),
        5
    );
    assert!(rows.iter().all(|row| !row.task.is_empty()));
    for row in rows.iter().filter(|row| row.date == current.date) {
        assert_eq!(row.done, flag(&current, &row.task));
    }

    let text = client
        .get(format!("{}/report.txt", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(text.contains("Date"));
    assert!(text.contains(&current.date));
}
