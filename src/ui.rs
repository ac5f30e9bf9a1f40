use crate::display::{DisplayState, WordCloud};

const REFRESH_INTERVAL_MS: u64 = 60_000;

pub fn render_index(display: &DisplayState) -> String {
    let view = display.view();
    fill_template(INDEX_HTML, |key| match key {
        "COUNT" => Some(escape_html(&view.count)),
        "AVG" => Some(escape_html(&view.average)),
        "FILL" => Some(format!("{:.1}", view.fill_percent)),
        "STATUS" => Some(escape_html(&view.status)),
        "MISSION" => Some(escape_html(&view.mission)),
        "LOG" => Some(
            view.log
                .iter()
                .map(|line| format!("<li>{}</li>", escape_html(line)))
                .collect(),
        ),
        "CLOUD" => Some(match &view.cloud {
            WordCloud::Placeholder { text } => placeholder(text),
            WordCloud::Words { .. } => String::new(),
        }),
        "STATE_JSON" => Some(state_json(display)),
        "UNAVAILABLE_JSON" => Some(state_json(&DisplayState::unavailable())),
        "REFRESH_MS" => Some(REFRESH_INTERVAL_MS.to_string()),
        _ => None,
    })
}

/// Substitutes `{{KEY}}` markers in a single pass. Substituted text is never
/// scanned again, and unknown keys are left as they are.
fn fill_template(template: &str, value: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let filled = after
            .find("}}")
            .and_then(|end| value(&after[..end]).map(|text| (end, text)));
        match filled {
            Some((end, text)) => {
                out.push_str(&text);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn placeholder(text: &str) -> String {
    format!(r#"<p class="wordcloud-empty">{}</p>"#, escape_html(text))
}

/// JSON for an inline `<script>` block; `<` is escaped so keyword text
/// cannot close the tag.
fn state_json(display: &DisplayState) -> String {
    serde_json::to_string(display)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Thermometer</title>
  <script src="https://cdn.jsdelivr.net/npm/wordcloud@1.2.2/src/wordcloud2.js"></script>
  <style>
    :root {
      --bg: #f4f1ec;
      --ink: #2b2a28;
      --muted: #7b766f;
      --accent: #ff6b4a;
      --cool: #4a90e2;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: -apple-system, BlinkMacSystemFont, "Pretendard", system-ui, sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .checkin {
      display: grid;
      gap: 14px;
    }

    .levels {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .levels input {
      position: absolute;
      opacity: 0;
    }

    .levels label {
      padding: 10px 18px;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
      cursor: pointer;
      font-weight: 600;
    }

    .levels input:checked + label {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
    }

    .fields {
      display: grid;
      grid-template-columns: 1fr 2fr auto;
      gap: 10px;
    }

    input[type="text"] {
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font: inherit;
    }

    button {
      border: none;
      border-radius: 12px;
      padding: 10px 22px;
      font: inherit;
      font-weight: 600;
      background: var(--ink);
      color: white;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.5;
      cursor: progress;
    }

    .today {
      display: grid;
      grid-template-columns: 80px 1fr;
      gap: 24px;
      align-items: stretch;
    }

    .thermo {
      position: relative;
      border-radius: 40px;
      background: #e8e3dc;
      min-height: 220px;
      overflow: hidden;
    }

    .thermo-fill {
      position: absolute;
      left: 0;
      right: 0;
      bottom: 0;
      background: linear-gradient(0deg, var(--cool), var(--accent));
      transition: height 600ms ease;
    }

    .numbers {
      display: flex;
      gap: 24px;
      font-size: 1.1rem;
    }

    .numbers strong {
      font-size: 1.8rem;
    }

    #status-text,
    #mission-text {
      margin: 8px 0;
    }

    #mission-text {
      color: var(--muted);
    }

    #emotion-log {
      margin: 0;
      padding-left: 18px;
      display: grid;
      gap: 4px;
    }

    #word-cloud {
      min-height: 260px;
      border-radius: 18px;
      background: #fafafa;
      position: relative;
    }

    .wordcloud-empty {
      margin: 0;
      padding: 24px;
      color: var(--muted);
      text-align: center;
    }

    .toast {
      position: fixed;
      bottom: 24px;
      left: 50%;
      transform: translateX(-50%) translateY(20px);
      background: var(--ink);
      color: white;
      padding: 10px 18px;
      border-radius: 12px;
      opacity: 0;
      transition: all 200ms ease;
      pointer-events: none;
    }

    .toast.show {
      opacity: 1;
      transform: translateX(-50%) translateY(0);
    }

    @media (max-width: 640px) {
      .fields {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Thermometer</h1>
    </header>
    <form id="checkin-form" class="checkin" method="post" action="/checkin">
      <div class="levels" role="radiogroup">
        <input type="radio" name="level" id="level-1" value="1" /><label for="level-1">1</label>
        <input type="radio" name="level" id="level-2" value="2" /><label for="level-2">2</label>
        <input type="radio" name="level" id="level-3" value="3" /><label for="level-3">3</label>
        <input type="radio" name="level" id="level-4" value="4" /><label for="level-4">4</label>
        <input type="radio" name="level" id="level-5" value="5" /><label for="level-5">5</label>
      </div>
      <div class="fields">
        <input type="text" name="name" id="name" placeholder="Name (optional)" />
        <input type="text" name="keywords" id="keywords" placeholder="Keywords, separated by commas" />
        <button id="submit-btn" type="submit">Submit</button>
      </div>
    </form>
    <section class="today">
      <div class="thermo"><div class="thermo-fill" id="thermo-fill" style="height: {{FILL}}%"></div></div>
      <div>
        <div class="numbers">
          <span>Check-ins <strong id="count">{{COUNT}}</strong></span>
          <span>Average <strong id="avg">{{AVG}}</strong></span>
        </div>
        <p id="status-text">{{STATUS}}</p>
        <p id="mission-text">{{MISSION}}</p>
        <ul id="emotion-log">{{LOG}}</ul>
      </div>
    </section>
    <section>
      <h2>Today's keywords</h2>
      <div id="word-cloud">{{CLOUD}}</div>
    </section>
  </main>
  <div class="toast" id="toast"></div>
  <script type="application/json" id="initial-state">{{STATE_JSON}}</script>
  <script type="application/json" id="unavailable-state">{{UNAVAILABLE_JSON}}</script>
  <script>
    const form = document.getElementById('checkin-form');
    const submitBtn = document.getElementById('submit-btn');
    const keywordsInput = document.getElementById('keywords');
    const countEl = document.getElementById('count');
    const avgEl = document.getElementById('avg');
    const fillEl = document.getElementById('thermo-fill');
    const statusEl = document.getElementById('status-text');
    const missionEl = document.getElementById('mission-text');
    const logEl = document.getElementById('emotion-log');
    const cloudEl = document.getElementById('word-cloud');
    const toastEl = document.getElementById('toast');

    const unavailableState = JSON.parse(document.getElementById('unavailable-state').textContent);
    const clientId = window.crypto && crypto.randomUUID
      ? crypto.randomUUID()
      : `${Date.now()}-${Math.random().toString(36).slice(2)}`;

    let latestTicket = 0;
    let appliedTicket = 0;
    let submitting = false;

    const placeholder = (text) => {
      const p = document.createElement('p');
      p.className = 'wordcloud-empty';
      p.textContent = text;
      cloudEl.replaceChildren(p);
    };

    const renderCloud = (cloud) => {
      if (cloud.kind !== 'words' || typeof WordCloud === 'undefined') {
        placeholder(cloud.text || '');
        return;
      }
      cloudEl.replaceChildren();
      WordCloud(cloudEl, Object.assign({ list: cloud.list }, cloud.config));
    };

    const applyState = (state) => {
      if (!state) {
        return;
      }
      countEl.textContent = state.count;
      avgEl.textContent = state.average;
      fillEl.style.height = `${state.fill_percent}%`;
      statusEl.textContent = state.status;
      missionEl.textContent = state.mission;
      logEl.replaceChildren(
        ...state.log.map((line) => {
          const li = document.createElement('li');
          li.textContent = line;
          return li;
        })
      );
      renderCloud(state.cloud);
    };

    const showToast = (message) => {
      toastEl.textContent = message;
      toastEl.classList.add('show');
      setTimeout(() => toastEl.classList.remove('show'), 2000);
    };

    const refresh = async () => {
      const ticket = ++latestTicket;
      try {
        const res = await fetch('/api/today');
        if (ticket < appliedTicket) {
          return;
        }
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const state = await res.json();
        if (ticket < appliedTicket) {
          return;
        }
        appliedTicket = ticket;
        applyState(state);
      } catch (err) {
        console.error(err);
        if (ticket >= appliedTicket) {
          appliedTicket = ticket;
          applyState(unavailableState);
        }
      }
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      if (submitting) {
        return;
      }
      const data = new FormData(form);
      const level = data.get('level');
      if (!level) {
        alert('Please choose a mood level (1-5)!');
        return;
      }

      submitting = true;
      submitBtn.disabled = true;
      const ticket = ++latestTicket;
      try {
        const res = await fetch('/api/checkin', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            name: data.get('name') || '',
            level: Number(level),
            keywords: data.get('keywords') || '',
            client_id: clientId
          })
        });
        if (!res.ok) {
          alert(await res.text());
          return;
        }
        const body = await res.json();
        showToast(body.message);
        keywordsInput.value = '';
        form.querySelectorAll('input[name="level"]').forEach((input) => {
          input.checked = false;
        });
        if (ticket >= appliedTicket) {
          appliedTicket = ticket;
          applyState(body.today);
        }
      } catch (err) {
        console.error(err);
        alert('A network error occurred. Please try again shortly.');
      } finally {
        submitting = false;
        submitBtn.disabled = false;
      }
    });

    document.addEventListener('visibilitychange', () => {
      if (document.visibilityState === 'visible') {
        refresh();
      }
    });
    setInterval(() => {
      if (document.visibilityState === 'visible' && !submitting) {
        refresh();
      }
    }, {{REFRESH_MS}});

    const initial = JSON.parse(document.getElementById('initial-state').textContent);
    if (initial && initial.cloud) {
      renderCloud(initial.cloud);
    }
  </script>
</body>
</html>
"#;
