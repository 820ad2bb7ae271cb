use crate::interface::AlarmStatus;

#[derive(PartialEq)]
pub enum Language {
 Chinese,
 English
}

pub fn language_from_code(code : &str) -> Language {
  match code {
    "en" => Language::English,
    _ => Language::Chinese,
  }
}

pub struct Texts {
  language : Language,
}

impl Texts {
 pub fn new(language : Language) -> Texts {
   Texts {language}
 }

 pub fn temperature<'a>(&self) -> &'a str {
     self.select("温度", "Temperature")
 }

 pub fn humidity<'a>(&self) -> &'a str {
     self.select("湿度", "Humidity")
 }

 pub fn voltage<'a>(&self) -> &'a str {
     self.select("电压", "Voltage")
 }

 pub fn current<'a>(&self) -> &'a str {
     self.select("电流", "Current")
 }

 pub fn leakage_current<'a>(&self) -> &'a str {
     self.select("漏电流", "Leakage current")
 }

 pub fn active_power<'a>(&self) -> &'a str {
     self.select("有功功率", "Active power")
 }

 pub fn reactive_power<'a>(&self) -> &'a str {
     self.select("无功功率", "Reactive power")
 }

 pub fn status<'a>(&self) -> &'a str {
     self.select("状态", "Status")
 }

 pub fn request_failed<'a>(&self) -> &'a str {
     self.select("请求失败", "Request failed")
 }

 pub fn updated_at<'a>(&self) -> &'a str {
     self.select("更新于", "Updated at")
 }

 pub fn alarm_text<'a>(&self, status : AlarmStatus) -> &'a str {
     match status {
       AlarmStatus::Unset => "",
       AlarmStatus::Normal => self.select("正常", "Normal"),
       AlarmStatus::Alarm => self.select("报警", "Alarm"),
     }
 }

 fn select<'a>(&self, t1 : &'a str, t2: &'a str) -> &'a str
 {
     if self.language == Language::Chinese {
         t1
     } else {
         t2
     }
 }

}
