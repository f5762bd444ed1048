// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::browser::traits::Key;
use crate::domain::repositories::config_repository::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;

/// 一个阶段内按配置顺序排列的命名步骤
pub type Phase = IndexMap<String, Step>;

/// 抓取配置
///
/// 一家航空公司对应一份配置，描述导航脚本与结果提取规则。
/// 加载后不可变。
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// 配置描述
    pub description: String,
    /// 导航脚本（before/main/after三个阶段）
    pub script: Script,
    /// 提取规则
    pub tag: TagRules,
}

/// 导航脚本
///
/// 三个阶段固定按 before、main、after 的顺序执行；
/// before 和 after 可以为空，main 必须非空。
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// 前置阶段
    #[serde(default)]
    pub before: Phase,
    /// 主阶段
    #[serde(default)]
    pub main: Phase,
    /// 后置阶段
    #[serde(default)]
    pub after: Phase,
}

/// 单个步骤
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// 动作类型
    pub action: Action,
    /// 动作参数，形状取决于动作类型
    pub att: StepArg,
}

/// 步骤动作
///
/// 封闭枚举：配置中出现未知动作时在解析阶段直接报错，
/// 而不是留到执行时再失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// 导航到URL
    Goto,
    /// 向输入框输入文本
    Input,
    /// 发送按键
    PressKey,
    /// 点击元素
    ClickElement,
    /// 静态等待
    Wait,
}

impl Action {
    /// 动作在配置中的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Goto => "goto",
            Action::Input => "input",
            Action::PressKey => "press_key",
            Action::ClickElement => "click_element",
            Action::Wait => "wait",
        }
    }
}

/// 步骤参数
///
/// `goto` 使用字符串URL，`wait` 使用秒数，
/// 其余动作使用 `{element, value}` 对象
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StepArg {
    /// 等待秒数
    Seconds(u64),
    /// URL字符串
    Text(String),
    /// 元素定位器及可选的输入值
    Target {
        element: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },
}

/// 提取规则集合
#[derive(Debug, Clone, Deserialize)]
pub struct TagRules {
    /// 重复结果组的提取规则
    pub result_group: ResultGroupRule,
}

/// 结果组规则
///
/// `tag` 定位重复的结果容器（组根节点），`items` 描述
/// 相对于组根节点的字段提取方式。
#[derive(Debug, Clone, Deserialize)]
pub struct ResultGroupRule {
    /// 组根节点定位器
    pub tag: String,
    /// 组内条目规则
    pub items: ItemsRule,
}

/// 组内条目规则
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsRule {
    /// 条目根节点定位器，相对于组根节点（"." 表示组根节点本身）
    pub tag: String,
    /// 字段名到提取规则的映射
    pub elements: IndexMap<String, ExtractionRule>,
}

/// 单字段提取规则
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionRule {
    /// 字段定位器，相对于条目根节点
    pub tag: String,
}

impl ScrapeConfig {
    /// 校验配置的结构约束
    ///
    /// 在加载时调用：main阶段非空、每个步骤的att形状与动作匹配、
    /// 按键名称合法、提取字段集合非空。
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 配置合法
    /// * `Err(ConfigError)` - 第一个发现的结构错误
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.script.main.is_empty() {
            return Err(ConfigError::MissingMainPhase);
        }

        for phase in [&self.script.before, &self.script.main, &self.script.after] {
            for (name, step) in phase {
                Self::validate_step(name, step)?;
            }
        }

        if self.tag.result_group.items.elements.is_empty() {
            return Err(ConfigError::EmptyFieldSet);
        }

        Ok(())
    }

    fn validate_step(name: &str, step: &Step) -> Result<(), ConfigError> {
        let mismatch = || ConfigError::AttMismatch {
            step: name.to_string(),
            action: step.action.as_str(),
        };

        match (step.action, &step.att) {
            (Action::Goto, StepArg::Text(_)) => Ok(()),
            (Action::Wait, StepArg::Seconds(_)) => Ok(()),
            (
                Action::ClickElement,
                StepArg::Target {
                    element: Some(_), ..
                },
            ) => Ok(()),
            (
                Action::Input,
                StepArg::Target {
                    element: Some(_),
                    value: Some(_),
                },
            ) => Ok(()),
            (
                Action::PressKey,
                StepArg::Target {
                    value: Some(value), ..
                },
            ) => value
                .parse::<Key>()
                .map(|_| ())
                .map_err(|key| ConfigError::UnsupportedKey {
                    step: name.to_string(),
                    key,
                }),
            _ => Err(mismatch()),
        }
    }
}
