//! Instruction template sent to every provider.
//!
//! The topic is interpolated as-is. A topic can therefore carry its own
//! instructions into the prompt; the model is asked, not forced, to answer
//! with JSON only.

const ANALYSIS_PROMPT_HEAD: &str = r#"
Вы — эксперт по анализу решений и генерации структурированных данных. Ваша задача — проанализировать указанное ниже занятие или деятельность и сгенерировать исчерпывающий список плюсов и минусов, касающихся этого выбора.

### Строгие инструкции по форматированию:
1.  **Вывод должен быть ТОЛЬКО в формате JSON.** Не добавляйте никакого дополнительного текста, введения, пояснений или markdown-тегов (например, ```json) до или после самого JSON-объекта.
2.  Объект JSON должен иметь корневой ключ `analysis`.
3.  Объект `analysis` должен содержать два обязательных ключа: `pros` (Плюсы) и `cons` (Минусы).
4.  Значения ключей `pros` и `cons` должны быть **массивами строк**.
5.  Каждая строка в массиве должна быть кратким и четким утверждением (не более одного предложения).
6.  Язык ответа: Русский.

### Запрос для анализа:
**Проанализируйте следующее занятие:** "#;

const ANALYSIS_PROMPT_TAIL: &str = r#"

### Требуемый вывод (Строгий формат JSON):
{
  "analysis": {
    "pros": ["...", "..."],
    "cons": ["...", "..."]
  }
}
"#;

pub fn render_analysis_prompt(topic: &str) -> String {
    let mut prompt =
        String::with_capacity(ANALYSIS_PROMPT_HEAD.len() + topic.len() + ANALYSIS_PROMPT_TAIL.len());
    prompt.push_str(ANALYSIS_PROMPT_HEAD);
    prompt.push_str(topic);
    prompt.push_str(ANALYSIS_PROMPT_TAIL);
    prompt
}
