//! SQL 문자열 정리
//!
//! 드라이버 인용 과정에서 남은 이스케이프 시퀀스를 걷어내 로그에 찍힌
//! SQL이 작성한 그대로 읽히게 합니다. `sql` 필드를 기록하기 전에 호출자가
//! 직접 적용하는 헬퍼입니다.

use std::borrow::Cow;

/// SQL 문자열의 이스케이프 시퀀스 정리
///
/// `\\` → `\`, `\"` → `"`, `\'` → `'` 순서로 치환합니다. 백슬래시가
/// 없는 입력은 복사 없이 그대로 반환됩니다.
pub fn normalize(sql: &str) -> Cow<'_, str> {
    if !sql.contains('\\') {
        return Cow::Borrowed(sql);
    }

    let cleaned = sql
        .replace("\\\\", "\\")
        .replace("\\\"", "\"")
        .replace("\\'", "'");

    Cow::Owned(cleaned)
}
