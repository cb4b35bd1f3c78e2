/// A stored conversation collection as an earlier build could have written
/// it: one finished exchange with usage counts, one freshly created
/// conversation, and a sprinkle of fields the current schema does not know
/// about.
pub fn conversations_fixture() -> &'static str {
    return r#"
[
  {
    "id": "b3a24a5e-2e3f-4bb8-9f2e-6a4f4f0e6f1d",
    "state": "Idle",
    "title": "Algorithms",
    "chats": [
      {
        "id": "7a0a43f4-9636-4f92-8661-070e2e484bd8",
        "role": "user",
        "content": "What is an algorithm?",
        "usage": null
      },
      {
        "id": "0ff3a0f9-dd9c-4f7c-bd47-ee5f0e2bd01e",
        "role": "assistant",
        "content": "An algorithm is a finite sequence of well-defined steps for solving a problem.",
        "usage": {
          "prompt_tokens": 13,
          "completion_tokens": 26
        }
      }
    ],
    "last_updated": "2023-11-05T09:14:32Z",
    "settings": {
      "chat_model": "gpt-3.5-turbo",
      "temperature": 1.0,
      "top_probability_mass": 1.0,
      "max_tokens": 600,
      "presence_penalty": 0.0,
      "frequency_penalty": 0.0,
      "system_content": "You are an AI assistant."
    }
  },
  {
    "id": "4fd0b4ed-5c3c-44a6-b02b-c0a543f8b60e",
    "state": "Asking",
    "title": "A chat",
    "pinned": false,
    "chats": [
      {
        "id": "92a88cbb-8c84-4a2f-b089-1c3a6dfe3b8e",
        "role": "user",
        "content": ""
      }
    ],
    "last_updated": "2023-11-07T18:02:11Z",
    "settings": {
      "chat_model": "gpt-4",
      "temperature": 0.7,
      "top_probability_mass": 1.0,
      "max_tokens": 1024,
      "presence_penalty": 0.0,
      "frequency_penalty": 0.5,
      "system_content": "You are a terse assistant."
    }
  }
]
"#
    .trim();
}

/// Stored user settings, also carrying an unknown field.
pub fn user_settings_fixture() -> &'static str {
    return r#"
{
  "api_key": "sk-fixture-123",
  "default_model": "gpt-4",
  "appearance": "dark"
}
"#
    .trim();
}
