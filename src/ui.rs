use crate::models::{DayView, TaskSummary};
use std::fmt::Write;

pub fn render_index(today: &DayView, summary: &[TaskSummary]) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.date)
        .replace("{{PERCENT}}", &format!("{:.0}", today.percent))
        .replace("{{CHECKLIST}}", &checklist_rows(today))
        .replace("{{SUMMARY}}", &summary_rows(summary))
}

fn checklist_rows(day: &DayView) -> String {
    let mut html = String::new();
    for status in &day.tasks {
        let checked = if status.done { " checked" } else { "" };
        let _ = writeln!(
            html,
            r#"        <form method="post" action="/check" class="task">
          <input type="hidden" name="task" value="{slug}" />
          <label>
            <input type="checkbox" data-task="{slug}"{checked} onchange="this.form.requestSubmit()" />
            {label}
          </label>
        </form>"#,
            slug = status.task.slug(),
            label = status.task.label(),
        );
    }
    html
}

fn summary_rows(summary: &[TaskSummary]) -> String {
    let mut html = String::new();
    for entry in summary {
        let _ = writeln!(
            html,
            "          <tr><td>{}</td><td>{}/{} days</td></tr>",
            entry.task.label(),
            entry.completed,
            entry.window
        );
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Hair Care Tracker</title>
  <style>
    :root {
      --paper: #f4f7f2;
      --ink: #23302a;
      --muted: #6b7a72;
      --leaf: #3f7d5a;
      --warn: #c4572f;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--paper), #e3eee6);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 28px 16px 40px;
    }

    main {
      width: min(720px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    section {
      background: var(--card);
      border-radius: 16px;
      padding: 22px;
      box-shadow: 0 12px 32px rgba(35, 48, 42, 0.08);
    }

    h1 {
      margin: 0 0 4px;
      font-size: clamp(1.7rem, 4vw, 2.3rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.15rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .progress {
      height: 10px;
      border-radius: 999px;
      background: #dfe8e2;
      overflow: hidden;
      margin: 14px 0 6px;
    }

    .progress span {
      display: block;
      height: 100%;
      background: var(--leaf);
      transition: width 200ms ease;
    }

    .task label {
      display: flex;
      align-items: center;
      gap: 10px;
      padding: 8px 0;
      cursor: pointer;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--leaf);
      color: white;
    }

    button.secondary {
      background: var(--warn);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td, th {
      text-align: left;
      padding: 6px 4px;
      border-bottom: 1px solid #edf1ee;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    .day {
      border-top: 1px solid #edf1ee;
      padding-top: 10px;
      margin-top: 10px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main>
    <section>
      <h1>Hair Care Tracker</h1>
      <p class="subtitle">Date: <strong id="date">{{DATE}}</strong></p>
      <div class="progress"><span id="bar" style="width: {{PERCENT}}%"></span></div>
      <p class="subtitle"><span id="percent">{{PERCENT}}</span>% done today</p>
    </section>

    <section>
      <h2>Today's checklist</h2>
      <div id="checklist">
{{CHECKLIST}}      </div>
      <div class="row">
        <form method="post" action="/reset" id="reset-form">
          <button class="secondary" type="submit">Reset today</button>
        </form>
        <a href="/report.txt"><button type="button">Download report</button></a>
      </div>
      <p class="status" id="status"></p>
    </section>

    <section>
      <h2>Last 7 days</h2>
      <table>
        <thead><tr><th>Task</th><th>Completed</th></tr></thead>
        <tbody id="summary">
{{SUMMARY}}        </tbody>
      </table>
    </section>

    <section>
      <h2>Browse days</h2>
      <div class="row">
        <label>From <input type="date" id="start" /></label>
        <label>To <input type="date" id="end" /></label>
      </div>
      <div id="days"></div>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const setStatus = (text) => {
      statusEl.textContent = text;
    };

    const updateToday = (day) => {
      const percent = Math.round(day.percent);
      document.getElementById('percent').textContent = percent;
      document.getElementById('bar').style.width = `${percent}%`;
      day.tasks.forEach((status) => {
        const box = document.querySelector(`#checklist input[type=checkbox][data-label="${status.task}"]`);
        if (box) {
          box.checked = status.done;
        }
      });
    };

    const loadSummary = async () => {
      const res = await fetch('/api/summary');
      if (!res.ok) {
        throw new Error('Unable to load summary');
      }
      const rows = await res.json();
      document.getElementById('summary').innerHTML = rows
        .map((row) => `<tr><td>${row.task}</td><td>${row.completed}/${row.window} days</td></tr>`)
        .join('');
    };

    const renderDay = (day) => {
      const items = day.tasks
        .map((status) => {
          const checked = status.done ? ' checked' : '';
          const box = `<input type="checkbox" data-date="${day.date}" data-task="${status.task}"${checked} />`;
          return `<li><label>${box} ${status.task}</label></li>`;
        })
        .join('');
      return `<div class="day"><strong>${day.date}</strong> (${Math.round(day.percent)}%)<ul>${items}</ul></div>`;
    };

    const loadDays = async () => {
      const params = new URLSearchParams({
        start: document.getElementById('start').value,
        end: document.getElementById('end').value
      });
      const res = await fetch(`/api/days?${params}`);
      if (!res.ok) {
        throw new Error(await res.text());
      }
      const days = await res.json();
      document.getElementById('days').innerHTML = days.map(renderDay).join('');
    };

    const send = async (url, body) => {
      setStatus('Saving...');
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      const day = await res.json();
      if (day.date === document.getElementById('date').textContent) {
        updateToday(day);
      }
      await Promise.all([loadSummary(), loadDays()]);
      setStatus('Saved');
      setTimeout(() => setStatus(''), 1200);
    };

    document.querySelectorAll('#checklist input[type=checkbox]').forEach((box) => {
      box.dataset.label = box.parentElement.textContent.trim();
      box.onchange = () => {
        send('/api/toggle', { task: box.dataset.task }).catch((err) => setStatus(err.message));
      };
    });

    document.getElementById('reset-form').addEventListener('submit', (event) => {
      event.preventDefault();
      send('/api/reset', {}).catch((err) => setStatus(err.message));
    });

    document.getElementById('days').addEventListener('change', (event) => {
      const box = event.target;
      if (!box.dataset.date) {
        return;
      }
      send('/api/toggle', { task: box.dataset.task, date: box.dataset.date })
        .catch((err) => setStatus(err.message));
    });

    ['start', 'end'].forEach((id) => {
      document.getElementById(id).addEventListener('change', () => {
        loadDays().catch((err) => setStatus(err.message));
      });
    });

    loadDays().catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
