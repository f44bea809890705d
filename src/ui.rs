use crate::models::SummaryResponse;

pub fn render_index(summary: &SummaryResponse) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &summary.today.to_string())
        .replace("{{CURRENT}}", &format!("{:03}", summary.current_streak))
        .replace("{{LONGEST}}", &format!("{:03}", summary.longest_streak))
        .replace("{{TOTAL}}", &format!("{:03}", summary.total_submissions))
        .replace("{{LEVEL}}", summary.level.label())
        .replace("{{STAGE}}", summary.stage.label())
        .replace("{{VOLUME}}", summary.volume.label())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Growth Protocol</title>
  <style>
    :root {
      --bg: #0d1110;
      --card: #141a18;
      --line: #24302c;
      --ink: #d7e2dc;
      --muted: #7d8c85;
      --accent: #5fd3a0;
      --warn: #e0786a;
    }

    * {
      box-sizing: border-box;
    }

    [hidden] {
      display: none !important;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "JetBrains Mono", "Menlo", monospace;
      display: grid;
      place-items: start center;
      padding: 48px 18px;
    }

    .app {
      width: min(820px, 100%);
      display: grid;
      gap: 36px;
    }

    header {
      text-align: center;
    }

    h1 {
      font-weight: 500;
      letter-spacing: 0.08em;
      color: var(--accent);
      margin: 0 0 12px;
    }

    .rule {
      width: 96px;
      height: 1px;
      background: var(--accent);
      opacity: 0.3;
      margin: 0 auto;
    }

    .tabs {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      max-width: 360px;
      margin: 0 auto;
      border: 1px solid var(--line);
    }

    .tabs button {
      background: transparent;
      color: var(--muted);
      border: 0;
      padding: 10px;
      font: inherit;
      cursor: pointer;
    }

    .tabs button.active {
      color: var(--accent);
      background: rgba(95, 211, 160, 0.1);
    }

    .panel {
      display: none;
      gap: 24px;
    }

    .panel.active {
      display: grid;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      padding: 24px;
      text-align: center;
    }

    .value {
      font-size: 2rem;
      margin-bottom: 6px;
    }

    .label {
      font-size: 0.75rem;
      color: var(--muted);
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .hint {
      font-size: 0.75rem;
      color: var(--accent);
      margin-top: 10px;
      min-height: 1em;
    }

    .hint.warn {
      color: var(--warn);
    }

    .garden {
      text-align: center;
      padding: 32px;
      border: 1px solid var(--line);
      background: var(--card);
    }

    .garden .node {
      width: 48px;
      height: 48px;
      margin: 0 auto 18px;
      border: 1px solid var(--accent);
      background: rgba(95, 211, 160, 0.15);
    }

    form {
      display: grid;
      gap: 12px;
      max-width: 420px;
      margin: 0 auto;
      width: 100%;
    }

    input, textarea {
      background: var(--card);
      color: var(--ink);
      border: 1px solid var(--line);
      padding: 10px;
      font: inherit;
    }

    form button {
      background: rgba(95, 211, 160, 0.12);
      color: var(--accent);
      border: 1px solid var(--accent);
      padding: 10px;
      font: inherit;
      cursor: pointer;
    }

    .calendar-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
      max-width: 360px;
      margin: 0 auto;
      width: 100%;
    }

    .calendar-head button {
      background: transparent;
      color: var(--muted);
      border: 1px solid var(--line);
      font: inherit;
      cursor: pointer;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      max-width: 360px;
      margin: 0 auto;
      width: 100%;
    }

    .grid div {
      aspect-ratio: 1;
      display: grid;
      place-items: center;
      font-size: 0.75rem;
      color: var(--muted);
      border: 1px solid transparent;
    }

    .grid .day {
      border-color: var(--line);
    }

    .grid .active {
      color: var(--accent);
      border-color: var(--accent);
      background: rgba(95, 211, 160, 0.15);
    }

    .grid .today {
      outline: 1px solid var(--ink);
    }

    #status {
      text-align: center;
      font-size: 0.8rem;
      min-height: 1em;
    }

    #status.error {
      color: var(--warn);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Growth Protocol</h1>
      <div class="rule"></div>
    </header>

    <nav class="tabs">
      <button type="button" data-tab="monitor" class="active">Monitor</button>
      <button type="button" data-tab="input">Input</button>
      <button type="button" data-tab="archive">Archive</button>
    </nav>

    <section class="panel active" id="panel-monitor">
      <div class="garden">
        <div class="node"></div>
        <div class="label" id="stage">{{STAGE}}</div>
        <div class="hint warn" id="decay"></div>
      </div>
      <div class="cards">
        <div class="card">
          <div class="value" id="current">{{CURRENT}}</div>
          <div class="label" id="level">{{LEVEL}}</div>
          <div class="hint" id="next-level"></div>
          <div class="hint warn" id="at-risk"></div>
        </div>
        <div class="card">
          <div class="value" id="longest">{{LONGEST}}</div>
          <div class="label">Maximum Achieved</div>
          <div class="hint" id="record"></div>
        </div>
        <div class="card">
          <div class="value" id="total">{{TOTAL}}</div>
          <div class="label" id="volume">{{VOLUME}}</div>
        </div>
      </div>
    </section>

    <section class="panel" id="panel-input">
      <form id="submit-form" method="post" action="/submit">
        <label class="label" for="task">Task completed ({{TODAY}})</label>
        <input id="task" name="task" maxlength="100" required />
        <label class="label" for="note">Note</label>
        <textarea id="note" name="note" maxlength="300" rows="4"></textarea>
        <button type="submit">Submit</button>
      </form>
      <div class="card" id="done" hidden>
        <div class="label">Current session complete</div>
        <div class="hint" id="done-task"></div>
      </div>
    </section>

    <section class="panel" id="panel-archive">
      <div class="calendar-head">
        <button type="button" id="prev-month">&lt;</button>
        <div id="month-title"></div>
        <button type="button" id="next-month">&gt;</button>
      </div>
      <div class="label" style="text-align:center" id="month-count"></div>
      <div class="grid" id="calendar"></div>
    </section>

    <div id="status"></div>
  </main>

  <script>
    const MONTHS = ['JAN', 'FEB', 'MAR', 'APR', 'MAY', 'JUN', 'JUL', 'AUG', 'SEP', 'OCT', 'NOV', 'DEC'];
    const STAGES = {
      dormant: 'Initialization', node: 'Processing', branch: 'Expanding',
      network: 'Connecting', matrix: 'Stabilizing', system: 'Optimized'
    };
    const title = (value) => value.charAt(0).toUpperCase() + value.slice(1);
    const pad = (value, width) => String(value).padStart(width, '0');
    const byId = (id) => document.getElementById(id);
    const statusEl = byId('status');
    let view = null;

    const setStatus = (message, kind) => {
      statusEl.textContent = message;
      statusEl.className = kind || '';
    };

    const getJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const renderSummary = (s) => {
      byId('current').textContent = pad(s.current_streak, 3);
      byId('longest').textContent = pad(s.longest_streak, 3);
      byId('total').textContent = pad(s.total_submissions, 3);
      byId('level').textContent = title(s.level);
      byId('stage').textContent = STAGES[s.stage];
      byId('volume').textContent = title(s.volume);
      byId('next-level').textContent = s.days_to_next_level
        ? `${s.days_to_next_level} cycles to next level` : '';
      byId('at-risk').textContent = s.at_risk && s.current_streak > 0 ? 'System decay imminent' : '';
      byId('decay').textContent = s.decaying ? 'System degradation detected' : '';
      byId('record').textContent = s.new_record ? 'New record established' : '';
    };

    const renderToday = (t) => {
      byId('submit-form').hidden = t.submitted;
      byId('done').hidden = !t.submitted;
      byId('done-task').textContent = t.entry ? t.entry.task : '';
    };

    const renderCalendar = (c) => {
      byId('month-title').textContent = `${MONTHS[c.month - 1]} ${c.year}`;
      byId('month-count').textContent = `${pad(c.active_days, 2)} / ${pad(c.days_in_month, 2)} active`;
      const grid = byId('calendar');
      grid.replaceChildren();
      for (const name of ['S', 'M', 'T', 'W', 'T', 'F', 'S']) {
        const cell = document.createElement('div');
        cell.textContent = name;
        grid.appendChild(cell);
      }
      for (let i = 0; i < c.first_weekday; i++) {
        grid.appendChild(document.createElement('div'));
      }
      for (const day of c.days) {
        const cell = document.createElement('div');
        cell.textContent = day.day;
        cell.className = ['day', day.has_entry ? 'active' : '', day.is_today ? 'today' : ''].join(' ');
        cell.title = day.date;
        grid.appendChild(cell);
      }
      view = { year: c.year, month: c.month };
    };

    const loadCalendar = async (year, month) => {
      const query = year ? `?year=${year}&month=${month}` : '';
      renderCalendar(await getJson(`/api/calendar${query}`));
    };

    const shiftMonth = (delta) => {
      if (!view) return;
      const index = view.year * 12 + (view.month - 1) + delta;
      loadCalendar(Math.floor(index / 12), (index % 12) + 1).catch((err) => setStatus(err.message, 'error'));
    };

    const refresh = async () => {
      const [summary, today] = await Promise.all([getJson('/api/summary'), getJson('/api/today')]);
      renderSummary(summary);
      renderToday(today);
      await loadCalendar(view && view.year, view && view.month);
    };

    document.querySelectorAll('.tabs button').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('.tabs button').forEach((b) => b.classList.toggle('active', b === button));
        document.querySelectorAll('.panel').forEach((panel) => {
          panel.classList.toggle('active', panel.id === `panel-${button.dataset.tab}`);
        });
      });
    });

    byId('prev-month').addEventListener('click', () => shiftMonth(-1));
    byId('next-month').addEventListener('click', () => shiftMonth(1));

    byId('submit-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const task = byId('task').value.trim();
      if (!task) {
        setStatus('Input required for system update', 'error');
        return;
      }
      setStatus('Processing...', '');
      try {
        const res = await fetch('/api/submit', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ task, note: byId('note').value.trim() })
        });
        if (!res.ok) {
          throw new Error((await res.text()) || 'Request failed');
        }
        renderSummary(await res.json());
        byId('task').value = '';
        byId('note').value = '';
        await refresh();
        setStatus('Data processed. System updated.', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
