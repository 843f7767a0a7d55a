use serde_json::Value;

use crate::models::{EmergencyRecord, Language};

/// English instruction template, reproduced byte-for-byte from the reference
/// assistant so generated guidance keeps its two-section adult/child format.
const INSTRUCTION_EN: &str = r#"You are a highly experienced emergency first aid assistant trusted by thousands of users. 
Based on the given data, generate expert-level first aid guidance with two clearly separated sections:

1. ✅ Adult First Aid Guidance  
2. 🧒 Child First Aid Guidance  

Each section must be:
- Clear, bulleted, and step-by-step  
- Calm, confident, and compassionate in tone  
- Include natural remedies if they are safe and medically sound (like honey, aloe vera, or clean cool water)  
- Avoid any mention of data sources, AI, or technical process  
- Speak like a professional medical assistant or paramedic — not like an AI

You are a trusted emergency first-aid assistant. First, provide detailed and accurate guidance for **adults**, then for **children**.

Follow this format:
1. Start with first aid instructions based on the provided emergency information.
2. Add additional expert tips, risks, and natural remedies where possible.
3. Separate sections clearly: one for Adults, one for Children.

Answer in bullet points using a clear and calm tone.
"#;

/// Urdu counterpart of [`INSTRUCTION_EN`].
const INSTRUCTION_UR: &str = r#"آپ ایک نہایت تجربہ کار اور قابلِ اعتماد ایمرجنسی فرسٹ ایڈ ماہر ہیں۔ دی گئی معلومات کی بنیاد پر دو واضح حصوں میں ہدایات فراہم کریں:

1. ✅ بڑوں کے لیے ابتدائی طبی امداد  
2. 🧒 بچوں کے لیے ابتدائی طبی امداد  

ہر سیکشن میں درج ذیل باتوں کا خیال رکھیں:
- نکات کی صورت میں آسان اور واضح اقدامات لکھیں  
- انداز پُرامن، پراعتماد اور ہمدرد ہو  
- اگر طبی طور پر محفوظ ہو تو قدرتی علاج (جیسے شہد، ایلو ویرا، یا ٹھنڈا پانی) شامل کریں  
- کسی بھی قسم کا سورس، AI یا ڈیٹا کا ذکر نہ کریں  
- ماہرِ طب یا پیرامیڈک کی طرح سیدھی، اعتماد والی بات کریں — مشورہ دینے والے AI کی طرح نہیں

آپ ایک قابلِ اعتماد ایمرجنسی فرسٹ ایڈ اسسٹنٹ ہیں۔ پہلے **بالغ افراد** کے لیے تفصیلی اور درست ہدایات دیں، پھر **بچوں** کے لیے دیں۔

مندرجہ ذیل انداز میں جواب دیں:
1. دی گئی ایمرجنسی معلومات کی بنیاد پر پہلے فرسٹ ایڈ بتائیں۔
2. پھر ماہرانہ تجاویز، خطرات، اور قدرتی علاج کے طریقے شامل کریں۔
3. بالغ اور بچوں کی رہنمائی کو واضح طور پر الگ الگ سیکشن میں لکھیں۔

نکات کی شکل میں صاف اور پر اعتماد لہجے میں جواب دیں۔
"#;

fn instruction(language: Language) -> &'static str {
    match language {
        Language::English => INSTRUCTION_EN,
        Language::Urdu => INSTRUCTION_UR,
    }
}

/// Compose the full prompt: instruction, then the user's question, then the
/// matched knowledge context when there is any. The "User asked: " marker and
/// the context header are part of the wire contract with the templates and
/// must not change.
pub fn build_prompt(query: &str, matches: &[EmergencyRecord], language: Language) -> String {
    let mut prompt = format!("{}\n\nUser asked: {}", instruction(language), query);
    if !matches.is_empty() {
        prompt.push_str("\n\nHere is some emergency information that may help:\n");
        for record in matches {
            render_record(record, &mut prompt);
        }
    }
    prompt
}

/// One record becomes a block of `name:` headers; list values render one
/// bullet line per element, scalars render inline. Field order is file order.
fn render_record(record: &EmergencyRecord, out: &mut String) {
    for (name, value) in record.fields() {
        out.push_str(name);
        out.push_str(":\n");
        match value {
            Value::Array(items) => {
                for item in items {
                    out.push_str("- ");
                    push_scalar(item, out);
                    out.push('\n');
                }
            }
            other => {
                push_scalar(other, out);
                out.push('\n');
            }
        }
    }
}

fn push_scalar(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}
